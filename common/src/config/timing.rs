//! Timing configuration constants.
//!
//! All durations are integers in the unit named by the suffix. The tick
//! quantum is kept in microseconds so that N ticks accumulate to exactly
//! N × quantum with no rounding drift.
//!
//! # Compile-Time Validation
//!
//! The refresh-latency bound is checked against the shortest beat interval the
//! monitor supports. Changing the dwell time or the maximum heart rate so that
//! the display could hide a whole beat fails the build.

use super::display::DIGIT_COUNT;

// =============================================================================
// Tick Source
// =============================================================================

/// Real-world period of one tick event, in microseconds.
///
/// Timer compare value 0x9C with a /1024 prescaler at 16 MHz gives 10.048 ms;
/// the RP2350 tick task is driven at the same period so calibration carries over.
pub const TICK_QUANTUM_US: u64 = 10_048;

/// Interval between ADC conversions published to the sample cell.
pub const SAMPLE_INTERVAL_US: u64 = 1_000;

/// Interval between status reports from the main loop.
pub const STATUS_INTERVAL_MS: u64 = 1_000;

// A beat must span several samples for the detector to see both levels.
const _: () = assert!(SAMPLE_INTERVAL_US * 10 < MIN_BEAT_INTERVAL_US as u64);

// =============================================================================
// Estimator Floors
// =============================================================================

/// Beats at or before this much elapsed time are discarded (startup transient).
pub const WARMUP_FLOOR_MS: u32 = 1_000;

/// No estimate is published at or before this much elapsed time.
pub const STABILIZATION_FLOOR_MS: u32 = 5_000;

/// Width of the sliding window used by `EstimatorMode::SlidingWindow`.
pub const SLIDING_WINDOW_MS: u32 = 10_000;

const _: () = assert!(WARMUP_FLOOR_MS < STABILIZATION_FLOOR_MS);

// =============================================================================
// Display Refresh Cadence
// =============================================================================

/// Time each digit stays lit during a refresh cycle.
pub const DIGIT_DWELL_US: u32 = 2_500;

/// Allowance for segment/select switching and the digit decomposition per digit.
pub const SWITCH_OVERHEAD_US: u32 = 100;

/// Upper bound for one full refresh cycle (all digits).
pub const REFRESH_CYCLE_BOUND_US: u32 = DIGIT_COUNT as u32 * (DIGIT_DWELL_US + SWITCH_OVERHEAD_US);

// =============================================================================
// Physiological Limits
// =============================================================================

/// Highest heart rate the monitor is expected to follow.
pub const MAX_HEART_RATE_BPM: u32 = 200;

/// Shortest beat-to-beat interval at `MAX_HEART_RATE_BPM` (300 ms).
pub const MIN_BEAT_INTERVAL_US: u32 = 60_000_000 / MAX_HEART_RATE_BPM;

// The detector is paused for one refresh cycle per loop iteration. It has to see
// both the ABOVE and the BELOW half of the shortest beat, so a refresh cycle must
// fit at least twice into the shortest interval.
const _: () = assert!(2 * REFRESH_CYCLE_BOUND_US < MIN_BEAT_INTERVAL_US);

// Full cycle must stay under ~20 ms (50 Hz) to avoid visible flicker.
const _: () = assert!(REFRESH_CYCLE_BOUND_US < 20_000);
