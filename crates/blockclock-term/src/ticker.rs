// SPDX-License-Identifier: MIT
//
// Tick loop — paint, write, rewind, sleep, until interrupted.
//
// Two states. `Running` from the moment `run` is called; `Stopping` once
// the interrupt flag is seen (or a write fails). On the way out the loop
// calls `Restore::restore` exactly once and returns.
//
//   ┌─────────┐  flag set / write error  ┌──────────┐
//   │ Running │ ───────────────────────► │ Stopping │ ── restore() ──► return
//   └─────────┘                          └──────────┘
//
// Each tick while running:
//
//   1. check the interrupt flag
//   2. if a frame is on screen, move the cursor up over it (`ESC[<N>A\r`)
//   3. paint a fresh frame and write it out in one flush
//   4. sleep until the next deadline, in short slices, re-checking the flag
//
// Rewinding *before* painting rather than after writing means that when
// the loop stops, the cursor sits below the last frame and the shell prompt
// does not land on top of the clock.
//
// Deadlines advance by a fixed interval from the previous deadline, so
// redraws do not drift. If the process was stopped (SIGTSTP) and falls more
// than a full interval behind, the schedule restarts from now instead of
// firing a burst of catch-up frames.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use crate::ansi;
use crate::frame::Frame;
use crate::signal::Interrupt;
use crate::terminal::Restore;

// ─── App Trait ───────────────────────────────────────────────────────────────

/// Whatever the tick loop displays.
pub trait App {
    /// Paint the current state into `frame`.
    ///
    /// The frame has been cleared before this call — paint everything you
    /// want visible.
    fn paint(&mut self, frame: &mut Frame);
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// Timing for the tick loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickConfig {
    /// Time between redraws.
    pub interval: Duration,
    /// Longest single sleep; bounds how long an interrupt goes unnoticed.
    pub poll_slice: Duration,
}

impl TickConfig {
    /// Fast redraw for the plain clock (200 ms).
    pub const FAST: Self = Self {
        interval: Duration::from_millis(200),
        poll_slice: Duration::from_millis(50),
    };

    /// Once a second, for the bordered clock with the blinking colon.
    pub const SECOND: Self = Self {
        interval: Duration::from_secs(1),
        poll_slice: Duration::from_millis(50),
    };

    /// Custom interval with the default poll slice (capped at the interval).
    #[must_use]
    pub fn every(interval: Duration) -> Self {
        Self {
            interval,
            poll_slice: interval.min(Self::FAST.poll_slice),
        }
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self::FAST
    }
}

// ─── State ───────────────────────────────────────────────────────────────────

/// Where the tick loop is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Painting a frame every tick.
    Running,
    /// Interrupted or failed; the terminal is being (or has been) restored.
    Stopping,
}

// ─── Ticker ──────────────────────────────────────────────────────────────────

/// The clock's main loop.
///
/// # Example
///
/// ```no_run
/// use std::io;
/// use blockclock_term::frame::Frame;
/// use blockclock_term::signal::Interrupt;
/// use blockclock_term::terminal::RawDisplay;
/// use blockclock_term::ticker::{App, TickConfig, Ticker};
///
/// struct Hello;
///
/// impl App for Hello {
///     fn paint(&mut self, frame: &mut Frame) {
///         frame.push("hello".to_string());
///     }
/// }
///
/// let interrupt = Interrupt::install()?;
/// let mut display = RawDisplay::enter()?;
/// let mut ticker = Ticker::new(TickConfig::FAST, interrupt);
/// ticker.run(&mut Hello, &mut display, &mut io::stdout())?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct Ticker {
    config: TickConfig,
    interrupt: Interrupt,
    state: State,
    frames: u64,
}

impl Ticker {
    #[must_use]
    pub const fn new(config: TickConfig, interrupt: Interrupt) -> Self {
        Self {
            config,
            interrupt,
            state: State::Stopping,
            frames: 0,
        }
    }

    /// Current lifecycle state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Frames written by the last (or current) [`run`](Self::run).
    #[inline]
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Run until the interrupt flag is raised, then restore the terminal.
    ///
    /// `display.restore()` is called exactly once, whether the loop ends by
    /// interrupt or by a write error.
    ///
    /// # Errors
    ///
    /// Returns the first write error, or the restore error if the loop
    /// itself succeeded.
    pub fn run(
        &mut self,
        app: &mut impl App,
        display: &mut impl Restore,
        out: &mut impl Write,
    ) -> io::Result<()> {
        self.state = State::Running;
        self.frames = 0;
        tracing::debug!(interval = ?self.config.interval, "tick loop running");

        let result = self.run_inner(app, out);

        self.state = State::Stopping;
        tracing::debug!(frames = self.frames, ok = result.is_ok(), "tick loop stopping");
        let restored = display.restore();
        result.and(restored)
    }

    /// The loop proper, separated so restore runs regardless of outcome.
    fn run_inner(&mut self, app: &mut impl App, out: &mut impl Write) -> io::Result<()> {
        let mut frame = Frame::new();
        let mut on_screen = 0;
        let mut deadline = Instant::now();

        while !self.interrupt.is_requested() {
            if on_screen > 0 {
                ansi::cursor_up(out, on_screen)?;
            }

            frame.clear();
            app.paint(&mut frame);
            frame.write_to(out)?;
            out.flush()?;
            on_screen = frame.height();
            self.frames += 1;

            deadline += self.config.interval;
            let now = Instant::now();
            if now > deadline + self.config.interval {
                tracing::debug!(behind = ?(now - deadline), "tick schedule reset");
                deadline = now;
            }
            self.sleep_until(deadline);
        }

        Ok(())
    }

    /// Sleep until `deadline`, waking every `poll_slice` to check the flag.
    fn sleep_until(&self, deadline: Instant) {
        loop {
            if self.interrupt.is_requested() {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            thread::sleep((deadline - now).min(self.config.poll_slice));
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    const QUICK: TickConfig = TickConfig {
        interval: Duration::from_millis(1),
        poll_slice: Duration::from_millis(1),
    };

    /// Counts restore calls instead of touching the terminal.
    #[derive(Default)]
    struct CountingRestore {
        calls: usize,
    }

    impl Restore for CountingRestore {
        fn restore(&mut self) -> io::Result<()> {
            self.calls += 1;
            Ok(())
        }
    }

    /// Paints a two-line frame and raises the interrupt mid-paint on the
    /// `stop_at`th tick, the way Ctrl-C can land during composition.
    struct StopAfter {
        painted: usize,
        stop_at: usize,
        interrupt: Interrupt,
    }

    impl App for StopAfter {
        fn paint(&mut self, frame: &mut Frame) {
            self.painted += 1;
            frame.push(format!("tick {}", self.painted));
            if self.painted == self.stop_at {
                self.interrupt.request();
            }
            frame.push("----".to_string());
        }
    }

    /// A writer that fails once `budget` writes have been spent.
    struct FailingWriter {
        budget: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.budget -= 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // ── Config ──────────────────────────────────────────────────────

    #[test]
    fn default_config_is_fast() {
        assert_eq!(TickConfig::default(), TickConfig::FAST);
        assert_eq!(TickConfig::FAST.interval, Duration::from_millis(200));
    }

    #[test]
    fn every_caps_poll_slice_at_interval() {
        let c = TickConfig::every(Duration::from_millis(20));
        assert_eq!(c.poll_slice, Duration::from_millis(20));
        let c = TickConfig::every(Duration::from_secs(2));
        assert_eq!(c.poll_slice, Duration::from_millis(50));
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    #[test]
    fn interrupt_mid_tick_stops_after_that_frame() {
        static FLAG: AtomicBool = AtomicBool::new(false);
        let interrupt = Interrupt::from_flag(&FLAG);
        let mut app = StopAfter {
            painted: 0,
            stop_at: 3,
            interrupt,
        };
        let mut display = CountingRestore::default();
        let mut out = Vec::new();

        let mut ticker = Ticker::new(QUICK, interrupt);
        ticker.run(&mut app, &mut display, &mut out).unwrap();

        assert_eq!(ticker.state(), State::Stopping);
        assert_eq!(app.painted, 3);
        assert_eq!(ticker.frames(), 3);
        assert_eq!(display.calls, 1);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("tick 1\n----\n"));
        // Rewinds between frames, never after the last one.
        assert_eq!(text.matches("\x1b[2A\r").count(), 2);
        assert!(text.ends_with("tick 3\n----\n"));
    }

    #[test]
    fn interrupt_before_first_tick_restores_once() {
        static FLAG: AtomicBool = AtomicBool::new(true);
        let interrupt = Interrupt::from_flag(&FLAG);
        let mut app = StopAfter {
            painted: 0,
            stop_at: 0,
            interrupt,
        };
        let mut display = CountingRestore::default();
        let mut out = Vec::new();

        let mut ticker = Ticker::new(QUICK, interrupt);
        ticker.run(&mut app, &mut display, &mut out).unwrap();

        assert_eq!(app.painted, 0);
        assert!(out.is_empty());
        assert_eq!(display.calls, 1);
    }

    #[test]
    fn write_failure_still_restores_once() {
        static FLAG: AtomicBool = AtomicBool::new(false);
        let interrupt = Interrupt::from_flag(&FLAG);
        let mut app = StopAfter {
            painted: 0,
            stop_at: usize::MAX,
            interrupt,
        };
        let mut display = CountingRestore::default();
        let mut out = FailingWriter { budget: 5 };

        let mut ticker = Ticker::new(QUICK, interrupt);
        let err = ticker.run(&mut app, &mut display, &mut out).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(ticker.state(), State::Stopping);
        assert_eq!(display.calls, 1);
    }

    #[test]
    fn restore_error_surfaces_when_loop_succeeds() {
        struct Broken;
        impl Restore for Broken {
            fn restore(&mut self) -> io::Result<()> {
                Err(io::Error::other("tcsetattr"))
            }
        }

        static FLAG: AtomicBool = AtomicBool::new(true);
        let interrupt = Interrupt::from_flag(&FLAG);
        let mut app = StopAfter {
            painted: 0,
            stop_at: 0,
            interrupt,
        };

        let mut ticker = Ticker::new(QUICK, interrupt);
        let err = ticker.run(&mut app, &mut Broken, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("tcsetattr"));
    }

    #[test]
    fn sleep_returns_early_when_interrupted() {
        static FLAG: AtomicBool = AtomicBool::new(true);
        let ticker = Ticker::new(TickConfig::SECOND, Interrupt::from_flag(&FLAG));
        let start = Instant::now();
        ticker.sleep_until(start + Duration::from_secs(5));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
