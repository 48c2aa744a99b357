//! Multiplexed display configuration.
//!
//! Three common-cathode digits share seven segment lines (A-G); one select
//! line per digit picks which digit the segment lines currently drive.

use super::timing::DIGIT_DWELL_US;

/// Segment lines A through G.
pub const SEGMENT_COUNT: usize = 7;

/// Digit positions (units, tens, hundreds).
pub const DIGIT_COUNT: usize = 3;

/// Electrical level that turns a line on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Polarity {
    /// High = on (common cathode segments, NPN digit drivers).
    #[default]
    ActiveHigh,
    /// Low = on (common anode segments, PNP digit drivers).
    ActiveLow,
}

impl Polarity {
    /// Pin level (true = high) that puts a line into `on`.
    #[inline]
    pub const fn level(
        self,
        on: bool,
    ) -> bool {
        match self {
            Self::ActiveHigh => on,
            Self::ActiveLow => !on,
        }
    }
}

/// Display driver settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Time each digit stays lit per refresh cycle.
    pub dwell_us: u32,
    pub segment_polarity: Polarity,
    pub select_polarity: Polarity,
}

impl DisplayConfig {
    pub const fn new() -> Self {
        Self {
            dwell_us: DIGIT_DWELL_US,
            segment_polarity: Polarity::ActiveHigh,
            select_polarity: Polarity::ActiveHigh,
        }
    }

    /// Both line groups inverted (common anode wiring).
    pub const fn common_anode() -> Self {
        Self {
            segment_polarity: Polarity::ActiveLow,
            select_polarity: Polarity::ActiveLow,
            ..Self::new()
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self { Self::new() }
}
