// SPDX-License-Identifier: MIT
//
// Renderer — a Reading in, a Frame out.
//
// The outer loop runs over glyph rows, not characters: row `r` of the frame
// is the left padding followed by row `r` of every glyph in the time string,
// left to right. Glyphs are resolved once per frame into slots (glyph plus
// optional color) before any row is built.
//
// Plain mode is just those `GLYPH_HEIGHT` rows. Bordered mode wraps them in
// a double-line box with a bold date header:
//
//   ╔══════════════════════════════╗
//   ║  Mon, 19 Oct 2026            ║   header
//   ║                              ║   spacer
//   ║  ██████\   ██████\  ...      ║   GLYPH_HEIGHT rows
//   ║                              ║   spacer
//   ╚══════════════════════════════╝
//
// Nothing in here can fail. A character with no glyph becomes blank filler
// of the same width, and the frame goes out anyway.

use std::fmt::Write as _;

use blockclock_term::ansi::{self, Fg, Sgr};
use blockclock_term::frame::Frame;
use blockclock_term::style::{Attr, CellColor};
use unicode_width::UnicodeWidthStr;

use crate::glyph::{self, GLYPH_HEIGHT, GLYPH_WIDTH, Glyph};
use crate::time::Reading;

/// Columns of padding left of the first glyph.
pub const LEFT_PAD: usize = 2;

const PAD: &str = "  ";

/// Lines a bordered frame adds around the glyph rows.
pub const BORDER_LINES: usize = 5;

const DOUBLE_HORIZONTAL: char = '═';
const DOUBLE_VERTICAL: char = '║';
const DOUBLE_TOP_LEFT: char = '╔';
const DOUBLE_TOP_RIGHT: char = '╗';
const DOUBLE_BOTTOM_LEFT: char = '╚';
const DOUBLE_BOTTOM_RIGHT: char = '╝';

// ─── Options ─────────────────────────────────────────────────────────────────

/// Colors for the three fields of `HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPalette {
    pub hours: CellColor,
    pub minutes: CellColor,
    pub seconds: CellColor,
}

impl FieldPalette {
    /// Color for the character at `index` in the time string.
    ///
    /// The separator after a field takes the color of the field that
    /// follows it: `HH` is hours, `:MM` minutes, `:SS` seconds.
    #[must_use]
    pub const fn color_at(&self, index: usize) -> CellColor {
        if index < 2 {
            self.hours
        } else if index < 5 {
            self.minutes
        } else {
            self.seconds
        }
    }
}

impl Default for FieldPalette {
    fn default() -> Self {
        Self {
            hours: CellColor::BRIGHT_RED,
            minutes: CellColor::BRIGHT_GREEN,
            seconds: CellColor::BRIGHT_BLUE,
        }
    }
}

/// How to render a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Draw the double-line box and date header.
    pub bordered: bool,
    /// Hide the colons on even seconds.
    pub blink: bool,
    /// Per-field glyph colors; `None` renders in the terminal's default.
    pub color: Option<FieldPalette>,
}

impl RenderOptions {
    /// Glyph rows only, no blink, no color.
    pub const PLAIN: Self = Self {
        bordered: false,
        blink: false,
        color: None,
    };

    /// Boxed, blinking, colored.
    #[must_use]
    pub fn boxed() -> Self {
        Self {
            bordered: true,
            blink: true,
            color: Some(FieldPalette::default()),
        }
    }

    /// Number of lines a frame rendered with these options has.
    #[must_use]
    pub const fn frame_height(&self) -> usize {
        if self.bordered {
            GLYPH_HEIGHT + BORDER_LINES
        } else {
            GLYPH_HEIGHT
        }
    }
}

/// Inner width of a frame for `time`: padding plus one glyph per character.
///
/// In bordered mode this is the width between the two vertical rules.
#[must_use]
pub fn content_width(time: &str) -> usize {
    LEFT_PAD + time.chars().count() * GLYPH_WIDTH
}

// ─── Rendering ───────────────────────────────────────────────────────────────

/// A resolved glyph and the color to draw it in.
#[derive(Clone, Copy)]
struct Slot {
    glyph: &'static Glyph,
    color: Option<CellColor>,
}

fn resolve(reading: &Reading, options: &RenderOptions) -> Vec<Slot> {
    let hide_colon = options.blink && reading.is_even_second();

    reading
        .time()
        .chars()
        .enumerate()
        .map(|(i, symbol)| {
            let glyph = if symbol == ':' && hide_colon {
                &Glyph::BLANK
            } else {
                glyph::lookup(symbol).unwrap_or_else(|| {
                    tracing::debug!(?symbol, index = i, "no glyph, drawing blank");
                    &Glyph::BLANK
                })
            };
            let color = options
                .color
                .filter(|_| !glyph.is_blank())
                .map(|palette| palette.color_at(i));
            Slot { glyph, color }
        })
        .collect()
}

/// Padding plus row `row` of every slot.
fn glyph_line(slots: &[Slot], row: usize) -> String {
    let mut line = String::with_capacity(LEFT_PAD + slots.len() * (GLYPH_WIDTH * 3 + 10));
    line.push_str(PAD);
    for slot in slots {
        let text = slot.glyph.row(row);
        match slot.color {
            Some(color) => {
                let _ = write!(line, "{}{text}{}", Fg(color), ansi::RESET);
            }
            None => line.push_str(text),
        }
    }
    line
}

fn header_line(date: &str, width: usize) -> String {
    let fill = width.saturating_sub(LEFT_PAD + date.width());
    format!(
        "{DOUBLE_VERTICAL}{PAD}{}{date}{}{}{DOUBLE_VERTICAL}",
        Sgr(Attr::BOLD),
        ansi::RESET,
        " ".repeat(fill),
    )
}

/// Render `reading` into a fresh frame.
#[must_use]
pub fn render(reading: &Reading, options: &RenderOptions) -> Frame {
    let mut frame = Frame::with_capacity(options.frame_height());
    render_into(reading, options, &mut frame);
    frame
}

/// Render `reading`, appending lines to `frame`.
pub fn render_into(reading: &Reading, options: &RenderOptions, frame: &mut Frame) {
    let slots = resolve(reading, options);

    if !options.bordered {
        for row in 0..GLYPH_HEIGHT {
            frame.push(glyph_line(&slots, row));
        }
        return;
    }

    let width = content_width(reading.time());
    let rule: String = std::iter::repeat_n(DOUBLE_HORIZONTAL, width).collect();
    let spacer = format!("{DOUBLE_VERTICAL}{}{DOUBLE_VERTICAL}", " ".repeat(width));

    frame.push(format!("{DOUBLE_TOP_LEFT}{rule}{DOUBLE_TOP_RIGHT}"));
    frame.push(header_line(reading.date(), width));
    frame.push(spacer.clone());
    for row in 0..GLYPH_HEIGHT {
        let line = glyph_line(&slots, row);
        frame.push(format!("{DOUBLE_VERTICAL}{line}{DOUBLE_VERTICAL}"));
    }
    frame.push(spacer);
    frame.push(format!("{DOUBLE_BOTTOM_LEFT}{rule}{DOUBLE_BOTTOM_RIGHT}"));
}

// ─── Tests ───────────────────────────────────────────────────────────────────
