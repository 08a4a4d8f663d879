//! # blockclock-face — the clock face
//!
//! Turns a wall-clock sample into a frame of block-art text.
//!
//! ```text
//! TimeSource::now()      one Reading per tick (time, date, second)
//!     │
//!     ▼
//! glyph::lookup          11 fixed 8×10 glyphs; misses become blanks
//!     │
//!     ▼
//! render::render         rows × glyphs, optional box, blink, field colors
//!     │
//!     ▼
//! Frame                  handed to blockclock-term's tick loop
//! ```
//!
//! [`ClockFace`] ties a time source to render options and implements the
//! tick loop's `App` trait.

pub mod face;
pub mod glyph;
pub mod render;
pub mod time;

pub use face::ClockFace;
