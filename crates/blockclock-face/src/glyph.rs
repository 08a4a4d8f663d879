// SPDX-License-Identifier: MIT
//
// Glyph table — the block-art font.
//
// Eleven glyphs: the ten digits and the colon. Every glyph is exactly
// `GLYPH_HEIGHT` rows of `GLYPH_WIDTH` display columns, so a time string
// renders as a clean rectangle by concatenating row slices left to right.
// The row count is enforced by the type; the column count is checked by
// `verify`, which the binary runs before it touches the terminal.
//
// The table is an immutable `static`. Nothing mutates it, so nothing needs
// to synchronise access to it.

use unicode_width::UnicodeWidthStr;

/// Rows per glyph.
pub const GLYPH_HEIGHT: usize = 8;

/// Display columns per glyph row.
pub const GLYPH_WIDTH: usize = 10;

/// One row of blank filler, exactly [`GLYPH_WIDTH`] columns.
const BLANK_ROW: &str = "          ";

// ─── Glyph ───────────────────────────────────────────────────────────────────

/// Block-art representation of one displayable symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    symbol: char,
    rows: [&'static str; GLYPH_HEIGHT],
}

impl Glyph {
    /// All spaces, same dimensions as every other glyph.
    ///
    /// Stands in for a hidden colon and for characters the table lacks.
    pub const BLANK: Self = Self::new(' ', [BLANK_ROW; GLYPH_HEIGHT]);

    const fn new(symbol: char, rows: [&'static str; GLYPH_HEIGHT]) -> Self {
        Self { symbol, rows }
    }

    /// The symbol this glyph draws.
    #[inline]
    #[must_use]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// Row `index` (0 = top). Panics if `index >= GLYPH_HEIGHT`.
    #[inline]
    #[must_use]
    pub const fn row(&self, index: usize) -> &'static str {
        self.rows[index]
    }

    #[inline]
    #[must_use]
    pub const fn rows(&self) -> &[&'static str; GLYPH_HEIGHT] {
        &self.rows
    }

    /// Whether this is the blank filler glyph.
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// A malformed entry in the glyph table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GlyphError {
    /// A row is wider or narrower than [`GLYPH_WIDTH`].
    #[error("glyph '{symbol}' row {row} is {width} columns wide, expected {}", GLYPH_WIDTH)]
    RowWidth {
        symbol: char,
        row: usize,
        width: usize,
    },

    /// An entry sits in the slot of a different symbol.
    #[error("glyph table slot {slot} holds '{found}', expected '{expected}'")]
    Misplaced {
        slot: usize,
        found: char,
        expected: char,
    },
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// Symbols in table order: digits, then the colon.
pub const SYMBOLS: [char; 11] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':'];

#[rustfmt::skip]
static TABLE: [Glyph; SYMBOLS.len()] = [
    Glyph::new(
        '0',
        [
            r" ██████\  ",
            r"███ __██\ ",
            r"████\ ██ |",
            r"██\██\██ |",
            r"██ \████ |",
            r"██ |\███ |",
            r"\██████  /",
            r" \______/ ",
        ],
    ),
    Glyph::new(
        '1',
        [
            r"   ██\    ",
            r" ████ |   ",
            r" \_██ |   ",
            r"   ██ |   ",
            r"   ██ |   ",
            r"   ██ |   ",
            r" ██████\  ",
            r" \______| ",
        ],
    ),
    Glyph::new(
        '2',
        [
            r" ██████\  ",
            r"██  __██\ ",
            r"\__/  ██ |",
            r" ██████  |",
            r"██  ____/ ",
            r"██ |      ",
            r"████████\ ",
            r"\________|",
        ],
    ),
    Glyph::new(
        '3',
        [
            r" ██████\  ",
            r"██ ___██\ ",
            r"\_/   ██ |",
            r"  █████ / ",
            r"  \___██\ ",
            r"██\   ██ |",
            r"\██████  |",
            r" \______/ ",
        ],
    ),
    Glyph::new(
        '4',
        [
            r"██\   ██\ ",
            r"██ |  ██ |",
            r"██ |  ██ |",
            r"████████ |",
            r"\_____██ |",
            r"      ██ |",
            r"      ██ |",
            r"      \__|",
        ],
    ),
    Glyph::new(
        '5',
        [
            r"███████\  ",
            r"██  ____| ",
            r"██ |      ",
            r"███████\  ",
            r"\_____██\ ",
            r"██\   ██ |",
            r"\██████  |",
            r" \______/ ",
        ],
    ),
    Glyph::new(
        '6',
        [
            r" ██████\  ",
            r"██  __██\ ",
            r"██ /  \__|",
            r"███████\  ",
            r"██  __██\ ",
            r"██ /  ██ |",
            r" ██████  |",
            r" \______/ ",
        ],
    ),
    Glyph::new(
        '7',
        [
            r"████████\ ",
            r"\____██  |",
            r"    ██  / ",
            r"   ██  /  ",
            r"  ██  /   ",
            r" ██  /    ",
            r"██  /     ",
            r"\__/      ",
        ],
    ),
    Glyph::new(
        '8',
        [
            r" ██████\  ",
            r"██  __██\ ",
            r"██ /  ██ |",
            r" ██████  |",
            r"██  __██< ",
            r"██ /  ██ |",
            r"\██████  |",
            r" \______/ ",
        ],
    ),
    Glyph::new(
        '9',
        [
            r" ██████\  ",
            r"██  __██\ ",
            r"██ /  ██ |",
            r"\███████ |",
            r" \____██ |",
            r"██\   ██ |",
            r"\██████  |",
            r" \______/ ",
        ],
    ),
    Glyph::new(
        ':',
        [
            r"          ",
            r"          ",
            r"  ██\     ",
            r"  \__|    ",
            r"          ",
            r"  ██\     ",
            r"  \__|    ",
            r"          ",
        ],
    ),
];

/// Table slot for `symbol`, if it has one.
const fn slot(symbol: char) -> Option<usize> {
    match symbol {
        '0'..='9' => Some(symbol as usize - '0' as usize),
        ':' => Some(10),
        _ => None,
    }
}

/// Look up the glyph for `symbol`.
///
/// Returns `None` for anything outside `0`–`9` and `:`.
#[must_use]
pub fn lookup(symbol: char) -> Option<&'static Glyph> {
    slot(symbol).map(|i| &TABLE[i])
}

/// Check every glyph for uniform dimensions and correct placement.
///
/// # Errors
///
/// Returns the first [`GlyphError`] found.
pub fn verify() -> Result<(), GlyphError> {
    verify_table(&TABLE)
}

fn verify_table(table: &[Glyph]) -> Result<(), GlyphError> {
    for (i, (glyph, &expected)) in table.iter().zip(SYMBOLS.iter()).enumerate() {
        if glyph.symbol != expected {
            return Err(GlyphError::Misplaced {
                slot: i,
                found: glyph.symbol,
                expected,
            });
        }
        for (row, text) in glyph.rows.iter().enumerate() {
            let width = text.width();
            if width != GLYPH_WIDTH {
                return Err(GlyphError::RowWidth {
                    symbol: glyph.symbol,
                    row,
                    width,
                });
            }
        }
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
