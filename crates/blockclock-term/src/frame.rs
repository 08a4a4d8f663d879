// SPDX-License-Identifier: MIT
//
// Frame — one tick's worth of output, fully composed before it is written.
//
// A frame is a list of complete lines. The painter fills it, the tick loop
// writes it in one go and remembers its height so it can walk the cursor
// back up over it on the next tick. Lines may carry embedded SGR sequences;
// `uniform_width` measures them with the escapes ignored.

use std::io::{self, Write};

use crate::ansi;

/// One composed frame of terminal output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<String>,
}

impl Frame {
    /// An empty frame.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// An empty frame with room for `lines` lines.
    #[must_use]
    pub fn with_capacity(lines: usize) -> Self {
        Self {
            lines: Vec::with_capacity(lines),
        }
    }

    /// Drop all lines, keeping the allocation for the next tick.
    #[inline]
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Append a complete line (without its trailing newline).
    #[inline]
    pub fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    /// The composed lines, top to bottom.
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines — how far the cursor must travel back up.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The common display width of every line, ignoring escape sequences.
    ///
    /// Returns `None` if the frame is empty or the lines disagree.
    #[must_use]
    pub fn uniform_width(&self) -> Option<usize> {
        let mut widths = self.lines.iter().map(|l| ansi::display_width(l));
        let first = widths.next()?;
        widths.all(|w| w == first).then_some(first)
    }

    /// Write every line followed by `\n`.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying writer.
    pub fn write_to(&self, w: &mut impl Write) -> io::Result<()> {
        for line in &self.lines {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn frame(lines: &[&str]) -> Frame {
        let mut f = Frame::new();
        for l in lines {
            f.push((*l).to_string());
        }
        f
    }

    #[test]
    fn new_frame_is_empty() {
        let f = Frame::new();
        assert!(f.is_empty());
        assert_eq!(f.height(), 0);
        assert_eq!(f.uniform_width(), None);
    }

    #[test]
    fn write_terminates_every_line() {
        let f = frame(&["ab", "cd"]);
        let mut out = Vec::new();
        f.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ab\ncd\n");
    }

    #[test]
    fn uniform_width_ignores_escapes() {
        let f = frame(&["\x1b[91mabc\x1b[0m", "xyz"]);
        assert_eq!(f.uniform_width(), Some(3));
    }

    #[test]
    fn uniform_width_detects_ragged_lines() {
        let f = frame(&["abc", "ab"]);
        assert_eq!(f.uniform_width(), None);
    }

    #[test]
    fn clear_keeps_nothing() {
        let mut f = frame(&["a", "b", "c"]);
        assert_eq!(f.height(), 3);
        f.clear();
        assert!(f.is_empty());
    }
}
