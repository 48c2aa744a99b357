//! Terminal rendering of the 7-segment digits.
//!
//! Each digit is drawn in a 3×3 character cell:
//!
//! ```text
//!  _
//! |_|
//! |_|
//! ```

use pulse_common::{DIGIT_COUNT, SegmentMask};

/// Segment indices (0 = A … 6 = G).
const A: usize = 0;
const B: usize = 1;
const C: usize = 2;
const D: usize = 3;
const E: usize = 4;
const F: usize = 5;
const G: usize = 6;

fn mark(
    mask: SegmentMask,
    segment: usize,
    lit: char,
) -> char {
    if mask.is_lit(segment) { lit } else { ' ' }
}

/// Three text rows for patterns given in refresh order (units first).
///
/// Digits are laid out hundreds, tens, units from left to right.
pub fn digit_rows(patterns: [SegmentMask; DIGIT_COUNT]) -> [String; 3] {
    let mut rows = [String::new(), String::new(), String::new()];
    for mask in patterns.iter().rev() {
        rows[0].extend([' ', mark(*mask, A, '_'), ' ', ' ']);
        rows[1].extend([mark(*mask, F, '|'), mark(*mask, G, '_'), mark(*mask, B, '|'), ' ']);
        rows[2].extend([mark(*mask, E, '|'), mark(*mask, D, '_'), mark(*mask, C, '|'), ' ']);
    }
    for row in &mut rows {
        row.truncate(row.trim_end().len());
    }
    rows
}
