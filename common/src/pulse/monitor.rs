//! Monitor context: detector + estimator behind one owned value.
//!
//! The main loop owns a `PulseMonitor` and calls `poll` once per iteration.
//! All detector/estimator state lives here; nothing is process-global except
//! the interrupt-shared cells in `SharedSignals`.

use super::detector::{BeatDetector, Level, Transition};
use super::estimator::{BpmEstimate, BpmEstimator};
use crate::config::MonitorConfig;
use crate::shared::{ElapsedTime, SampleSnapshot, SharedSignals};

/// Result of one main-loop evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepOutcome {
    pub now: ElapsedTime,
    pub transition: Option<Transition>,
    /// True if a beat was emitted and survived the warm-up filter.
    pub beat_counted: bool,
    pub estimate: BpmEstimate,
}

/// Signal-to-rate pipeline state.
pub struct PulseMonitor {
    config: MonitorConfig,
    detector: BeatDetector,
    estimator: BpmEstimator,
    last_sample: SampleSnapshot,
    evaluations: u32,
}

impl PulseMonitor {
    pub const fn new(config: MonitorConfig) -> Self {
        Self {
            detector: BeatDetector::new(&config),
            estimator: BpmEstimator::new(&config),
            config,
            last_sample: SampleSnapshot { value: 0, seq: 0 },
            evaluations: 0,
        }
    }

    /// Snapshot the shared cells and run one evaluation.
    pub fn poll(
        &mut self,
        signals: &SharedSignals,
    ) -> StepOutcome {
        let sample = signals.sample.latest();
        let now = signals.clock.read();
        self.step(sample, now)
    }

    /// Evaluate the detector on `sample`, feed any beat to the estimator,
    /// then refresh the estimate for `now`.
    pub fn step(
        &mut self,
        sample: SampleSnapshot,
        now: ElapsedTime,
    ) -> StepOutcome {
        self.last_sample = sample;
        self.evaluations = self.evaluations.wrapping_add(1);

        let transition = self.detector.evaluate(sample.value, now);
        let beat_counted = match transition.and_then(Transition::beat) {
            Some(beat) => self.estimator.record_beat(beat.at),
            None => false,
        };
        let estimate = self.estimator.refresh(now);

        StepOutcome {
            now,
            transition,
            beat_counted,
            estimate,
        }
    }

    #[inline]
    pub const fn estimate(&self) -> BpmEstimate { self.estimator.estimate() }

    #[inline]
    pub const fn beat_count(&self) -> u32 { self.estimator.beat_count() }

    #[inline]
    pub const fn level(&self) -> Level { self.detector.level() }

    /// Last sample the detector saw.
    #[inline]
    pub const fn last_sample(&self) -> SampleSnapshot { self.last_sample }

    /// Number of `step` calls (wrapping).
    #[inline]
    pub const fn evaluations(&self) -> u32 { self.evaluations }

    #[inline]
    pub const fn config(&self) -> &MonitorConfig { &self.config }

    /// Discard all beats and the estimate; warm-up starts again at `now`.
    pub fn restart(
        &mut self,
        now: ElapsedTime,
    ) {
        self.detector.reset();
        self.estimator.restart(now);
    }
}
