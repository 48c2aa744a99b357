//! BPM estimate → per-digit segment patterns.
//!
//! A `Frame` is computed once from a single estimate value at the start of a
//! refresh cycle and then only read, so the three digits of one cycle always
//! come from the same estimate.

use super::segments::SegmentMask;
use crate::config::DIGIT_COUNT;
use crate::pulse::BpmEstimate;

/// Decimal digits of a rate, truncated and taken modulo 1000.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayDigits {
    pub hundreds: u8,
    pub tens: u8,
    pub units: u8,
}

impl DisplayDigits {
    /// `floor(bpm) mod 10`, `floor(bpm / 10) mod 10`, `floor(bpm / 100) mod 10`.
    ///
    /// Negative and NaN inputs clamp to 0 (float → int casts saturate).
    pub fn from_bpm(bpm: f32) -> Self {
        let whole = bpm as u32;
        Self {
            hundreds: ((whole / 100) % 10) as u8,
            tens: ((whole / 10) % 10) as u8,
            units: (whole % 10) as u8,
        }
    }

    /// Digits in refresh order (units first).
    #[inline]
    pub const fn in_refresh_order(self) -> [u8; DIGIT_COUNT] { [self.units, self.tens, self.hundreds] }
}

/// What one refresh cycle shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    /// Rate unknown: dashes on every position.
    Idle,
    Digits(DisplayDigits),
}

impl Frame {
    pub fn from_estimate(estimate: BpmEstimate) -> Self {
        match estimate {
            BpmEstimate::Unknown => Self::Idle,
            BpmEstimate::Rate(bpm) => Self::Digits(DisplayDigits::from_bpm(bpm)),
        }
    }

    /// Segment pattern per position, in refresh order (units, tens, hundreds).
    pub fn patterns(self) -> [SegmentMask; DIGIT_COUNT] {
        match self {
            Self::Idle => [SegmentMask::DASH; DIGIT_COUNT],
            Self::Digits(digits) => digits
                .in_refresh_order()
                .map(|d| SegmentMask::for_digit(d).unwrap_or(SegmentMask::BLANK)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::segments::DIGIT_SEGMENTS;

    fn digits(
        hundreds: u8,
        tens: u8,
        units: u8,
    ) -> DisplayDigits {
        DisplayDigits { hundreds, tens, units }
    }

    #[test]
    fn test_decomposition_examples() {
        assert_eq!(DisplayDigits::from_bpm(75.0), digits(0, 7, 5));
        assert_eq!(DisplayDigits::from_bpm(123.0), digits(1, 2, 3));
        assert_eq!(DisplayDigits::from_bpm(0.0), digits(0, 0, 0));
    }

    #[test]
    fn test_truncates_fraction() {
        assert_eq!(DisplayDigits::from_bpm(74.99), digits(0, 7, 4));
        assert_eq!(DisplayDigits::from_bpm(99.9), digits(0, 9, 9));
    }

    #[test]
    fn test_wraps_above_999() {
        assert_eq!(DisplayDigits::from_bpm(1_234.0), digits(2, 3, 4));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(DisplayDigits::from_bpm(-5.0), digits(0, 0, 0));
        assert_eq!(DisplayDigits::from_bpm(f32::NAN), digits(0, 0, 0));
    }

    #[test]
    fn test_unknown_is_idle() {
        let frame = Frame::from_estimate(BpmEstimate::Unknown);
        assert_eq!(frame, Frame::Idle);
        assert_eq!(frame.patterns(), [SegmentMask::DASH; 3]);
    }

    #[test]
    fn test_zero_rate_shows_zeros() {
        let frame = Frame::from_estimate(BpmEstimate::Rate(0.0));
        assert_eq!(frame.patterns(), [DIGIT_SEGMENTS[0]; 3]);
    }

    #[test]
    fn test_patterns_in_refresh_order() {
        let frame = Frame::from_estimate(BpmEstimate::Rate(75.4));
        assert_eq!(frame.patterns(), [DIGIT_SEGMENTS[5], DIGIT_SEGMENTS[7], DIGIT_SEGMENTS[0]]);
    }
}
