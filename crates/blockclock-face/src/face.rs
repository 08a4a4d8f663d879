// SPDX-License-Identifier: MIT
//
// ClockFace — what the tick loop paints each tick.

use blockclock_term::frame::Frame;
use blockclock_term::ticker::App;

use crate::render::{self, RenderOptions};
use crate::time::TimeSource;

/// A time source plus the options to render it with.
#[derive(Debug, Clone)]
pub struct ClockFace<S> {
    source: S,
    options: RenderOptions,
}

impl<S: TimeSource> ClockFace<S> {
    #[must_use]
    pub const fn new(source: S, options: RenderOptions) -> Self {
        Self { source, options }
    }

    #[inline]
    #[must_use]
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }
}

impl<S: TimeSource> App for ClockFace<S> {
    fn paint(&mut self, frame: &mut Frame) {
        // One sample per tick: digits, date and blink phase all agree.
        let reading = self.source.now();
        render::render_into(&reading, &self.options, frame);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
