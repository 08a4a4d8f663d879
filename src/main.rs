// SPDX-License-Identifier: MIT
//
// blockclock — a block-art terminal clock.
//
// This is the binary that wires the two crates together:
//
//   blockclock-face → glyph table, time source, renderer (ClockFace)
//   blockclock-term → raw display mode, interrupt flag, tick loop
//
// Startup order matters. Everything that can fail without leaving a mess
// (argument parsing, glyph table verification, signal installation) runs
// before the terminal is touched. Only then is raw display mode entered;
// from that point the RawDisplay handle guarantees the terminal comes back.
//
//   parse args → verify glyphs → install SIGINT/SIGTERM → enter raw mode
//       → tick loop (paint → write → rewind → sleep) until interrupted
//       → restore terminal → exit 0
//
// Logs go to stderr so they never land inside a frame. Set `RUST_LOG` to
// see them (e.g. `RUST_LOG=debug blockclock 2>clock.log`).

use std::io;
use std::process;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use blockclock_face::ClockFace;
use blockclock_face::glyph;
use blockclock_face::render::{FieldPalette, RenderOptions};
use blockclock_face::time::LocalClock;
use blockclock_term::signal::Interrupt;
use blockclock_term::terminal::RawDisplay;
use blockclock_term::ticker::{TickConfig, Ticker};

// ─── Command Line ────────────────────────────────────────────────────────────

/// Block-art terminal clock. Ctrl-C to quit.
#[derive(Debug, Parser)]
#[command(name = "blockclock", version, about)]
struct Cli {
    /// Draw a double-line box with the date, colored fields and a blinking
    /// colon, redrawn once a second.
    #[arg(short, long)]
    bordered: bool,

    /// Blink the colons (default in bordered mode).
    #[arg(long, overrides_with = "no_blink")]
    blink: bool,

    /// Keep the colons steady.
    #[arg(long, overrides_with = "blink")]
    no_blink: bool,

    /// Draw the digits in the terminal's default color.
    #[arg(long)]
    no_color: bool,

    /// Redraw interval in milliseconds [default: 200, or 1000 when bordered].
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(10..=60_000))]
    interval_ms: Option<u64>,
}

impl Cli {
    /// Render options implied by the flags.
    fn options(&self) -> RenderOptions {
        let blink = if self.blink {
            true
        } else if self.no_blink {
            false
        } else {
            self.bordered
        };
        let color = (self.bordered && !self.no_color).then(FieldPalette::default);

        RenderOptions {
            bordered: self.bordered,
            blink,
            color,
        }
    }

    /// Tick timing: fast redraw for the plain clock, whole seconds boxed.
    fn tick_config(&self) -> TickConfig {
        match self.interval_ms {
            Some(ms) => TickConfig::every(Duration::from_millis(ms)),
            None if self.bordered => TickConfig::SECOND,
            None => TickConfig::FAST,
        }
    }
}

// ─── Entry Point ─────────────────────────────────────────────────────────────

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    glyph::verify().context("glyph table is malformed")?;

    let options = cli.options();
    let config = cli.tick_config();

    let interrupt = Interrupt::install().context("failed to install interrupt handler")?;
    let mut display = RawDisplay::enter().context("blockclock needs an interactive terminal")?;
    tracing::info!(?options, interval = ?config.interval, "clock started");

    let mut face = ClockFace::new(LocalClock, options);
    let mut out = io::BufWriter::new(io::stdout());
    let mut ticker = Ticker::new(config, interrupt);
    ticker
        .run(&mut face, &mut display, &mut out)
        .context("display loop failed")?;

    tracing::info!(frames = ticker.frames(), "clock stopped");
    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("blockclock: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
