//! Multiplexed seven-segment output.
//!
//! - `segments`: Static digit → segment lookup table
//! - `digits`: Estimate → digits → per-position patterns
//! - `driver`: Refresh cycle over `embedded-hal` output pins

mod digits;
mod driver;
mod segments;

pub use digits::{DisplayDigits, Frame};
pub use driver::MultiplexedDisplay;
pub use segments::{DIGIT_SEGMENTS, SegmentMask};
