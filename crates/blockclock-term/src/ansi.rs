// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Sequences come in two shapes. The `Display` types (`Fg`, `Sgr`,
// `CursorUp`) format into anything — a frame line being composed in a
// `String`, or a `write!` straight to stdout. The free functions are thin
// `io::Write` wrappers for the handful of sequences the terminal handle and
// tick loop emit directly.
//
// `strip` and `display_width` go the other way: they measure how wide a
// styled line will actually be on screen, ignoring CSI sequences.

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::style::{Attr, CellColor};

/// Reset all SGR attributes (SGR 0).
pub const RESET: &str = "\x1b[0m";

/// Hide the cursor (DECTCEM reset).
pub const CURSOR_HIDE: &str = "\x1b[?25l";

/// Show the cursor (DECTCEM set).
pub const CURSOR_SHOW: &str = "\x1b[?25h";

// ─── Display Sequences ───────────────────────────────────────────────────────

/// Foreground color sequence.
///
/// Uses compact SGR codes for standard colors (30-37, 90-97), the 256-color
/// extended format for palette indices 16-255, and 24-bit `TrueColor` for RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fg(pub CellColor);

impl fmt::Display for Fg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            CellColor::Default => f.write_str("\x1b[39m"),
            CellColor::Ansi256(idx) if idx < 8 => write!(f, "\x1b[{}m", 30 + u16::from(idx)),
            CellColor::Ansi256(idx) if idx < 16 => write!(f, "\x1b[{}m", 82 + u16::from(idx)),
            CellColor::Ansi256(idx) => write!(f, "\x1b[38;5;{idx}m"),
            CellColor::Rgb(r, g, b) => write!(f, "\x1b[38;2;{r};{g};{b}m"),
        }
    }
}

/// SGR parameter for each attribute, in emission order.
const SGR_CODES: [(Attr, &str); 4] = [
    (Attr::BOLD, "1"),
    (Attr::DIM, "2"),
    (Attr::ITALIC, "3"),
    (Attr::INVERSE, "7"),
];

/// SGR codes for text attributes as a single CSI sequence.
///
/// Multiple attributes are semicolon-separated: `\x1b[1;3m` for bold +
/// italic. Formats to nothing if no attributes are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sgr(pub Attr);

impl fmt::Display for Sgr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }

        f.write_str("\x1b[")?;
        let mut first = true;
        for (flag, code) in SGR_CODES {
            if self.0.contains(flag) {
                if !first {
                    f.write_str(";")?;
                }
                f.write_str(code)?;
                first = false;
            }
        }
        f.write_str("m")
    }
}

/// Move the cursor up `n` lines and back to column 0 (`CUU` + CR).
///
/// This is what the tick loop uses to land on the first line of the
/// previous frame so the next one overwrites it. `n == 0` formats to a bare
/// carriage return; CUU with a zero count would still move one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorUp(pub usize);

impl fmt::Display for CursorUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            f.write_str("\r")
        } else {
            write!(f, "\x1b[{}A\r", self.0)
        }
    }
}

// ─── io::Write Helpers ───────────────────────────────────────────────────────

/// Hide the cursor.
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(CURSOR_HIDE.as_bytes())
}

/// Show the cursor.
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(CURSOR_SHOW.as_bytes())
}

/// Move the cursor up `n` lines and return to column 0.
#[inline]
pub fn cursor_up(w: &mut impl Write, n: usize) -> io::Result<()> {
    write!(w, "{}", CursorUp(n))
}

/// Reset all SGR attributes to terminal defaults.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(RESET.as_bytes())
}

// ─── Measuring ───────────────────────────────────────────────────────────────

/// Remove CSI escape sequences (`ESC [ … final`) from `s`.
///
/// Borrows when there is nothing to strip. A lone ESC not followed by `[`
/// is dropped on its own.
#[must_use]
pub fn strip(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'[') {
            chars.next();
            // Parameter and intermediate bytes until the final byte (0x40–0x7E).
            for p in chars.by_ref() {
                if ('\x40'..='\x7e').contains(&p) {
                    break;
                }
            }
        }
    }
    Cow::Owned(out)
}

/// Number of terminal columns `s` occupies, ignoring escape sequences.
#[must_use]
pub fn display_width(s: &str) -> usize {
    strip(s).width()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
