//! Application configuration.
//!
//! - `timing`: Tick quantum, warm-up/stabilization floors, refresh cadence
//! - `signal`: Detector threshold and optional gates
//! - `display`: Multiplexed display geometry and line polarity

pub mod display;
pub mod signal;
pub mod timing;

// Re-export at config level for convenience
pub use display::{DIGIT_COUNT, DisplayConfig, Polarity, SEGMENT_COUNT};
pub use signal::{ADC_FULL_SCALE, DEFAULT_THRESHOLD, EstimatorMode, MonitorConfig, REFRACTORY_MS};
pub use timing::{
    DIGIT_DWELL_US,
    MAX_HEART_RATE_BPM,
    MIN_BEAT_INTERVAL_US,
    REFRESH_CYCLE_BOUND_US,
    SAMPLE_INTERVAL_US,
    SLIDING_WINDOW_MS,
    STABILIZATION_FLOOR_MS,
    STATUS_INTERVAL_MS,
    SWITCH_OVERHEAD_US,
    TICK_QUANTUM_US,
    WARMUP_FLOOR_MS,
};
