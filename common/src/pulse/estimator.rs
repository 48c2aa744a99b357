//! BPM estimation with warm-up and stabilization floors.
//!
//! Both floors are measured from the measurement epoch (power-on, or the last
//! `restart`). Beats at or before the warm-up floor are dropped. The estimate
//! stays `Unknown` until the stabilization floor has passed; after that it is
//! recomputed on every `refresh`, so a signal with no beats decays towards 0
//! instead of holding the last value.
//!
//! # Cumulative Estimator
//!
//! `beats / ((elapsed - warmup) / 1 min)`: beats counted since warm-up,
//! extrapolated to a minute over the whole time since warm-up. It gets less
//! responsive the longer it runs.
//!
//! # Sliding-Window Estimator
//!
//! Beats within the last `SLIDING_WINDOW_MS` (or since warm-up, if shorter),
//! extrapolated to a minute.

use heapless::Deque;

use crate::config::{EstimatorMode, MonitorConfig, SLIDING_WINDOW_MS};
use crate::shared::ElapsedTime;

/// Beat timestamps retained for the sliding window.
/// 220 BPM over a 10 s window needs ~37 entries.
///
/// Caps the sliding-window estimate at `WINDOW_CAPACITY × 60 s / window`
/// (288 BPM for 10 s): with more events than that in the window, the oldest
/// are overwritten and the estimate saturates instead of over-reporting. The
/// cumulative estimator has no such cap.
pub const WINDOW_CAPACITY: usize = 48;

const MICROS_PER_MINUTE: f32 = 60_000_000.0;

/// Current best-known heart rate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BpmEstimate {
    /// Stabilization floor not reached yet.
    #[default]
    Unknown,
    /// Beats per minute, never negative.
    Rate(f32),
}

impl BpmEstimate {
    #[inline]
    pub const fn rate(self) -> Option<f32> {
        match self {
            Self::Unknown => None,
            Self::Rate(bpm) => Some(bpm),
        }
    }

    #[inline]
    pub const fn is_known(self) -> bool { matches!(self, Self::Rate(_)) }
}

/// Reference formula: beats since warm-up extrapolated to one minute.
///
/// `since_epoch` is the elapsed time since the measurement started. Returns 0
/// when no time has passed since warm-up.
pub fn cumulative_bpm(
    beats: u32,
    since_epoch: ElapsedTime,
    warmup_floor: ElapsedTime,
) -> f32 {
    let span_us = since_epoch.since(warmup_floor).as_micros();
    if span_us == 0 {
        return 0.0;
    }
    beats as f32 * MICROS_PER_MINUTE / span_us as f32
}

/// Consumes beat events and elapsed time, publishes a BPM estimate.
pub struct BpmEstimator {
    mode: EstimatorMode,
    warmup_floor: ElapsedTime,
    stabilization_floor: ElapsedTime,
    window: ElapsedTime,
    epoch: ElapsedTime,
    beat_count: u32,
    recent: Deque<ElapsedTime, WINDOW_CAPACITY>,
    estimate: BpmEstimate,
}

impl BpmEstimator {
    pub const fn new(config: &MonitorConfig) -> Self {
        Self {
            mode: config.estimator,
            warmup_floor: ElapsedTime::from_millis(config.warmup_floor_ms as u64),
            stabilization_floor: ElapsedTime::from_millis(config.stabilization_floor_ms as u64),
            window: ElapsedTime::from_millis(SLIDING_WINDOW_MS as u64),
            epoch: ElapsedTime::ZERO,
            beat_count: 0,
            recent: Deque::new(),
            estimate: BpmEstimate::Unknown,
        }
    }

    /// Count a beat unless it falls inside the warm-up period.
    ///
    /// Returns true if the beat was counted.
    pub fn record_beat(
        &mut self,
        at: ElapsedTime,
    ) -> bool {
        if at.since(self.epoch) <= self.warmup_floor {
            return false;
        }

        self.beat_count = self.beat_count.saturating_add(1);

        if self.recent.is_full() {
            self.recent.pop_front();
        }
        // Cannot fail: a slot was freed above if needed
        let _ = self.recent.push_back(at);
        true
    }

    /// Recompute the estimate for `now` and return it.
    pub fn refresh(
        &mut self,
        now: ElapsedTime,
    ) -> BpmEstimate {
        let since_epoch = now.since(self.epoch);
        if since_epoch <= self.stabilization_floor {
            return self.estimate;
        }

        let bpm = match self.mode {
            EstimatorMode::Cumulative => cumulative_bpm(self.beat_count, since_epoch, self.warmup_floor),
            EstimatorMode::SlidingWindow => self.windowed_bpm(now, since_epoch),
        };
        self.estimate = BpmEstimate::Rate(bpm);
        self.estimate
    }

    fn windowed_bpm(
        &mut self,
        now: ElapsedTime,
        since_epoch: ElapsedTime,
    ) -> f32 {
        while let Some(&oldest) = self.recent.front() {
            if now.since(oldest) > self.window {
                self.recent.pop_front();
            } else {
                break;
            }
        }

        let since_warmup = since_epoch.since(self.warmup_floor);
        let span = if since_warmup < self.window { since_warmup } else { self.window };
        if span == ElapsedTime::ZERO {
            return 0.0;
        }
        self.recent.len() as f32 * MICROS_PER_MINUTE / span.as_micros() as f32
    }

    /// Last published estimate.
    #[inline]
    pub const fn estimate(&self) -> BpmEstimate { self.estimate }

    /// Beats counted since warm-up ended.
    #[inline]
    pub const fn beat_count(&self) -> u32 { self.beat_count }

    /// Start a new measurement at `now`: floors are measured from here.
    pub fn restart(
        &mut self,
        now: ElapsedTime,
    ) {
        self.epoch = now;
        self.beat_count = 0;
        self.recent.clear();
        self.estimate = BpmEstimate::Unknown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(ms: u64) -> ElapsedTime { ElapsedTime::from_millis(ms) }

    fn reference() -> BpmEstimator { BpmEstimator::new(&MonitorConfig::reference()) }

    #[test]
    fn test_formula_reference_example() {
        // 5 beats at 5000 ms with a 1000 ms warm-up = 75 BPM
        let bpm = cumulative_bpm(5, ms(5_000), ms(1_000));
        assert!((bpm - 75.0).abs() < 0.001);
    }

    #[test]
    fn test_formula_zero_span() {
        assert_eq!(cumulative_bpm(3, ms(1_000), ms(1_000)), 0.0);
        assert_eq!(cumulative_bpm(3, ms(500), ms(1_000)), 0.0);
    }

    #[test]
    fn test_warmup_suppression() {
        let mut est = reference();
        assert!(!est.record_beat(ms(800)));
        assert!(!est.record_beat(ms(1_000)));
        assert_eq!(est.beat_count(), 0);

        assert!(est.record_beat(ms(1_001)));
        assert_eq!(est.beat_count(), 1);
    }

    #[test]
    fn test_unknown_until_stabilization() {
        let mut est = reference();
        for t in (1_100..=5_000).step_by(100) {
            est.record_beat(ms(t));
            assert_eq!(est.refresh(ms(t)), BpmEstimate::Unknown);
        }
        assert!(est.beat_count() > 0);
        assert!(est.refresh(ms(5_001)).is_known());
    }

    #[test]
    fn test_published_after_stabilization() {
        let mut est = reference();
        for t in [1_800, 2_600, 3_400, 4_200, 5_000] {
            est.record_beat(ms(t));
        }
        assert_eq!(est.beat_count(), 5);

        // Just past the floor: 5 beats over 4.001 s since warm-up
        let bpm = est.refresh(ms(5_001)).rate().unwrap();
        assert!((bpm - 5.0 * 60_000.0 / 4_001.0).abs() < 0.01);
    }

    #[test]
    fn test_no_beats_is_zero_once_eligible() {
        let mut est = reference();
        assert_eq!(est.refresh(ms(6_000)), BpmEstimate::Rate(0.0));
    }

    #[test]
    fn test_estimate_decays_without_beats() {
        let mut est = reference();
        for t in (1_500..6_000).step_by(1_000) {
            est.record_beat(ms(t));
        }
        let early = est.refresh(ms(6_000)).rate().unwrap();
        let late = est.refresh(ms(20_000)).rate().unwrap();
        assert!(late < early);
    }

    #[test]
    fn test_beat_count_saturates() {
        let mut est = reference();
        est.beat_count = u32::MAX;
        est.record_beat(ms(2_000));
        assert_eq!(est.beat_count(), u32::MAX);
    }

    #[test]
    fn test_restart_moves_epoch() {
        let mut est = reference();
        est.record_beat(ms(2_000));
        est.refresh(ms(6_000));
        assert!(est.estimate().is_known());

        est.restart(ms(10_000));
        assert_eq!(est.estimate(), BpmEstimate::Unknown);
        assert_eq!(est.beat_count(), 0);

        // Warm-up is relative to the new epoch
        assert!(!est.record_beat(ms(10_900)));
        assert!(est.record_beat(ms(11_100)));
        assert_eq!(est.refresh(ms(14_000)), BpmEstimate::Unknown);
        assert!(est.refresh(ms(15_001)).is_known());
    }

    #[test]
    fn test_sliding_window_tracks_rate_change() {
        let config = MonitorConfig::reference().with_estimator(EstimatorMode::SlidingWindow);
        let mut sliding = BpmEstimator::new(&config);
        let mut cumulative = reference();

        // 60 BPM for 60 s, then 120 BPM for 20 s
        let mut t = 1_500;
        while t < 61_000 {
            sliding.record_beat(ms(t));
            cumulative.record_beat(ms(t));
            t += 1_000;
        }
        while t < 81_000 {
            sliding.record_beat(ms(t));
            cumulative.record_beat(ms(t));
            t += 500;
        }

        let fast = sliding.refresh(ms(81_000)).rate().unwrap();
        let slow = cumulative.refresh(ms(81_000)).rate().unwrap();
        assert!((fast - 120.0).abs() < 8.0, "sliding window: {fast}");
        assert!(slow < 90.0, "cumulative: {slow}");
    }

    #[test]
    fn test_sliding_window_short_span_after_warmup() {
        let config = MonitorConfig::reference().with_estimator(EstimatorMode::SlidingWindow);
        let mut est = BpmEstimator::new(&config);
        for t in [2_000, 3_000, 4_000, 5_000] {
            est.record_beat(ms(t));
        }
        // 4 beats over 5 s since warm-up (window not yet full)
        let bpm = est.refresh(ms(6_000)).rate().unwrap();
        assert!((bpm - 48.0).abs() < 0.01);
    }

    #[test]
    fn test_sliding_window_saturates_at_capacity() {
        let config = MonitorConfig::reference().with_estimator(EstimatorMode::SlidingWindow);
        let mut est = BpmEstimator::new(&config);
        // 100 chatter edges 50 ms apart, all inside the window
        for k in 0..100u64 {
            assert!(est.record_beat(ms(11_000 + 50 * k)));
        }
        assert_eq!(est.beat_count(), 100);

        let cap = (WINDOW_CAPACITY as u32 * 60_000 / SLIDING_WINDOW_MS) as f32;
        let bpm = est.refresh(ms(16_000)).rate().unwrap();
        assert!((bpm - cap).abs() < 0.01, "bpm = {bpm}");
        assert!((cap - 288.0).abs() < 0.01);
    }
}
