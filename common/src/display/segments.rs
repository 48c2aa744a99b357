//! Seven-segment encoding.
//!
//! ```text
//!    AAA
//!   F   B
//!    GGG
//!   E   C
//!    DDD
//! ```
//!
//! Bit 0 is segment A, bit 6 is segment G.

use crate::config::SEGMENT_COUNT;

/// Set of lit segments for one digit position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SegmentMask(u8);

impl SegmentMask {
    pub const A: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const C: Self = Self(1 << 2);
    pub const D: Self = Self(1 << 3);
    pub const E: Self = Self(1 << 4);
    pub const F: Self = Self(1 << 5);
    pub const G: Self = Self(1 << 6);

    /// Nothing lit.
    pub const BLANK: Self = Self(0);

    /// Single dash (segment G), shown while the rate is unknown.
    pub const DASH: Self = Self::G;

    #[inline]
    pub const fn from_bits(bits: u8) -> Self { Self(bits & 0x7F) }

    #[inline]
    pub const fn bits(self) -> u8 { self.0 }

    /// Whether segment `index` (0 = A … 6 = G) is lit.
    #[inline]
    pub const fn is_lit(
        self,
        index: usize,
    ) -> bool {
        index < SEGMENT_COUNT && self.0 & (1 << index) != 0
    }

    /// Segment pattern for a decimal digit; `None` above 9.
    #[inline]
    pub const fn for_digit(digit: u8) -> Option<Self> {
        if digit < 10 { Some(DIGIT_SEGMENTS[digit as usize]) } else { None }
    }
}

/// Digit value → lit segments, indexed by 0-9.
pub const DIGIT_SEGMENTS: [SegmentMask; 10] = [
    SegmentMask(0b011_1111), // 0: A B C D E F
    SegmentMask(0b000_0110), // 1: B C
    SegmentMask(0b101_1011), // 2: A B D E G
    SegmentMask(0b100_1111), // 3: A B C D G
    SegmentMask(0b110_0110), // 4: B C F G
    SegmentMask(0b110_1101), // 5: A C D F G
    SegmentMask(0b111_1101), // 6: A C D E F G
    SegmentMask(0b000_0111), // 7: A B C
    SegmentMask(0b111_1111), // 8: all
    SegmentMask(0b110_1111), // 9: A B C D F G
];
