// SPDX-License-Identifier: MIT
//
// Time source — one sample of the wall clock per tick.
//
// A `Reading` carries everything the renderer derives from the clock: the
// `HH:MM:SS` string, the date for the bordered header, and the second used
// for the blinking colon. Taking all three from one sample means the colon
// can never disagree with the digits next to it at a second boundary.

use chrono::{Local, NaiveDateTime, Timelike};

/// `strftime` pattern for the time string: zero-padded 24-hour clock.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// `strftime` pattern for the header date, e.g. `Mon, 19 Oct 2026`.
pub const DATE_FORMAT: &str = "%a, %d %b %Y";

// ─── Reading ─────────────────────────────────────────────────────────────────

/// One sample of the wall clock, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    time: String,
    date: String,
    second: u32,
}

impl Reading {
    /// Build a reading from preformatted parts.
    ///
    /// `time` is rendered as-is; characters without a glyph become blanks.
    pub fn new(time: impl Into<String>, date: impl Into<String>, second: u32) -> Self {
        Self {
            time: time.into(),
            date: date.into(),
            second,
        }
    }

    /// Format a local date-time.
    #[must_use]
    pub fn from_naive(at: &NaiveDateTime) -> Self {
        Self {
            time: at.format(TIME_FORMAT).to_string(),
            date: at.format(DATE_FORMAT).to_string(),
            second: at.second(),
        }
    }

    /// The `HH:MM:SS` string.
    #[inline]
    #[must_use]
    pub fn time(&self) -> &str {
        &self.time
    }

    /// The header date string.
    #[inline]
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    #[inline]
    #[must_use]
    pub const fn second(&self) -> u32 {
        self.second
    }

    /// Whether the sampled second is even — the colon's "off" phase.
    #[inline]
    #[must_use]
    pub const fn is_even_second(&self) -> bool {
        self.second % 2 == 0
    }
}

// ─── Sources ─────────────────────────────────────────────────────────────────

/// Something that can be asked what time it is.
pub trait TimeSource {
    /// Sample the clock.
    fn now(&self) -> Reading;
}

/// The system's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl TimeSource for LocalClock {
    fn now(&self) -> Reading {
        Reading::from_naive(&Local::now().naive_local())
    }
}

/// A clock stuck at one reading. Useful for tests and screenshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(pub Reading);

impl TimeSource for FixedClock {
    fn now(&self) -> Reading {
        self.0.clone()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn time_is_zero_padded_24_hour() {
        assert_eq!(Reading::from_naive(&at(7, 5, 3)).time(), "07:05:03");
        assert_eq!(Reading::from_naive(&at(23, 59, 59)).time(), "23:59:59");
        assert_eq!(Reading::from_naive(&at(0, 0, 0)).time(), "00:00:00");
    }

    #[test]
    fn date_has_weekday_day_month_year() {
        assert_eq!(Reading::from_naive(&at(12, 0, 0)).date(), "Mon, 19 Oct 2026");
    }

    #[test]
    fn second_parity() {
        assert!(Reading::from_naive(&at(1, 2, 4)).is_even_second());
        assert!(!Reading::from_naive(&at(1, 2, 5)).is_even_second());
        assert_eq!(Reading::from_naive(&at(1, 2, 5)).second(), 5);
    }

    #[test]
    fn local_clock_reading_is_well_formed() {
        let r = LocalClock.now();
        assert_eq!(r.time().len(), 8);
        assert_eq!(r.time().as_bytes()[2], b':');
        assert_eq!(r.time().as_bytes()[5], b':');
        assert!(r.second() < 61);
    }

    #[test]
    fn fixed_clock_repeats_itself() {
        let clock = FixedClock(Reading::new("12:34:56", "Mon, 19 Oct 2026", 56));
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().time(), "12:34:56");
    }
}
