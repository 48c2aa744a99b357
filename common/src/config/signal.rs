//! Beat detection and estimation settings.
//!
//! `MonitorConfig::reference()` is the bare behaviour: fixed threshold, no
//! hysteresis, no refractory window, cumulative estimator. A bare threshold
//! chatters on noisy signals; `gated()` adds both gates.

use super::timing::{STABILIZATION_FLOOR_MS, WARMUP_FLOOR_MS};

/// Full-scale reading of the 12-bit RP2350 ADC.
pub const ADC_FULL_SCALE: u16 = 4095;

/// Detection threshold on the 12-bit scale (550 on a 10-bit converter, × 4).
pub const DEFAULT_THRESHOLD: u16 = 2200;

/// Refractory window used by the gated profile (matches `MIN_BEAT_INTERVAL_US`).
pub const REFRACTORY_MS: u32 = 300;

/// Hysteresis half-gap used by the gated profile.
pub const GATED_HYSTERESIS: u16 = 40;

const _: () = assert!(DEFAULT_THRESHOLD < ADC_FULL_SCALE);

/// How the BPM estimate is derived from counted beats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EstimatorMode {
    /// Beats since warm-up ÷ time since warm-up, extrapolated to a minute.
    #[default]
    Cumulative,
    /// Beats within the last `SLIDING_WINDOW_MS`, extrapolated to a minute.
    SlidingWindow,
}

/// Runtime settings for the beat detector and BPM estimator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Level the raw sample must exceed for a rising edge.
    pub threshold: u16,
    /// Extra margin above/below `threshold` before the level flips.
    pub hysteresis: u16,
    /// Minimum spacing between emitted beats, if any.
    pub refractory_ms: Option<u32>,
    /// Beats at or before this time since the epoch are discarded.
    pub warmup_floor_ms: u32,
    /// No estimate is published at or before this time since the epoch.
    pub stabilization_floor_ms: u32,
    pub estimator: EstimatorMode,
}

impl MonitorConfig {
    /// Reference behaviour: bare threshold, cumulative estimator.
    pub const fn reference() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            hysteresis: 0,
            refractory_ms: None,
            warmup_floor_ms: WARMUP_FLOOR_MS,
            stabilization_floor_ms: STABILIZATION_FLOOR_MS,
            estimator: EstimatorMode::Cumulative,
        }
    }

    /// Reference behaviour plus hysteresis and a refractory window.
    pub const fn gated() -> Self {
        Self {
            hysteresis: GATED_HYSTERESIS,
            refractory_ms: Some(REFRACTORY_MS),
            ..Self::reference()
        }
    }

    /// Same settings with a different estimator.
    pub const fn with_estimator(
        self,
        estimator: EstimatorMode,
    ) -> Self {
        Self { estimator, ..self }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self { Self::reference() }
}
