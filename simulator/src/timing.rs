//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::ops::RangeInclusive;
use std::time::Duration;

/// Wall-clock length of one simulated status interval in real-time mode.
pub const STATUS_WALL_TIME: Duration = Duration::from_millis(1_000);

/// Virtual time spent per main-loop iteration outside the display refresh
/// (snapshot, detector, estimator).
pub const LOOP_OVERHEAD_US: u64 = 40;

/// Default run length.
pub const DEFAULT_RUN_SECS: u64 = 20;

/// Default synthetic heart rate.
pub const DEFAULT_BPM: u32 = 72;

/// Synthetic heart rates the simulator accepts.
pub const BPM_RANGE: RangeInclusive<i64> = 20..=250;

/// Longest run the simulator accepts (one day).
pub const MAX_RUN_SECS: u64 = 86_400;
