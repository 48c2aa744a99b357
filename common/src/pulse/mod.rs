//! Signal-to-rate pipeline.
//!
//! - `detector`: Two-state threshold edge detector (beat events)
//! - `estimator`: Warm-up filter and BPM estimation
//! - `monitor`: Owned context tying both to the shared cells

mod detector;
mod estimator;
mod monitor;

pub use detector::{BeatDetector, BeatEvent, Level, Transition};
pub use estimator::{BpmEstimate, BpmEstimator, WINDOW_CAPACITY, cumulative_bpm};
pub use monitor::{PulseMonitor, StepOutcome};
