// SPDX-License-Identifier: MIT
//
// Text style — colors and SGR attributes.
//
// The clock only ever styles whole runs of text (a glyph slice, the date
// header), so there is no per-cell model here. A run is wrapped in an
// opening SGR sequence and closed with a reset; these types describe what
// goes into the opening sequence.

// ─── Text Attributes ─────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attributes stored as a compact bitfield.
    ///
    /// These map directly to SGR (Select Graphic Rendition) parameters.
    /// Combine with bitwise OR:
    ///
    /// ```
    /// use blockclock_term::style::Attr;
    ///
    /// let style = Attr::BOLD | Attr::ITALIC;
    /// assert!(style.contains(Attr::BOLD));
    /// assert!(!style.contains(Attr::DIM));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1 — increased intensity.
        const BOLD    = 1 << 0;
        /// SGR 2 — decreased intensity (faint).
        const DIM     = 1 << 1;
        /// SGR 3 — italic or oblique.
        const ITALIC  = 1 << 2;
        /// SGR 7 — swap foreground and background.
        const INVERSE = 1 << 3;
    }
}

// ─── CellColor ───────────────────────────────────────────────────────────────

/// Foreground color for a styled run.
///
/// Palette indices 8–15 are the "bright" ANSI colors and are emitted with
/// the compact SGR 90–97 codes, which every terminal understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),

    /// ANSI 256-color palette index.
    Ansi256(u8),

    /// Terminal default color (inherits from terminal settings).
    #[default]
    Default,
}

impl CellColor {
    /// Bright red (SGR 91).
    pub const BRIGHT_RED: Self = Self::Ansi256(9);
    /// Bright green (SGR 92).
    pub const BRIGHT_GREEN: Self = Self::Ansi256(10);
    /// Bright blue (SGR 94).
    pub const BRIGHT_BLUE: Self = Self::Ansi256(12);

    /// Whether this is the terminal default (no color sequence needed).
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_default_is_empty() {
        assert!(Attr::default().is_empty());
    }

    #[test]
    fn attr_combines() {
        let a = Attr::BOLD | Attr::INVERSE;
        assert!(a.contains(Attr::BOLD));
        assert!(a.contains(Attr::INVERSE));
        assert!(!a.contains(Attr::ITALIC));
    }

    #[test]
    fn color_default_is_default() {
        assert!(CellColor::default().is_default());
        assert!(!CellColor::BRIGHT_RED.is_default());
    }

    #[test]
    fn bright_colors_are_distinct() {
        assert_ne!(CellColor::BRIGHT_RED, CellColor::BRIGHT_GREEN);
        assert_ne!(CellColor::BRIGHT_GREEN, CellColor::BRIGHT_BLUE);
        assert_ne!(CellColor::BRIGHT_RED, CellColor::BRIGHT_BLUE);
    }
}
