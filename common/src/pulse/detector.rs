//! Two-state threshold edge detector.
//!
//! The detector is level based: it only remembers whether the signal was last
//! seen ABOVE or BELOW the threshold. A BELOW→ABOVE transition is a qualifying
//! edge and emits a beat; ABOVE→BELOW emits nothing. A sample equal to the
//! threshold, or one that agrees with the current level, leaves the state
//! untouched, so re-evaluating a stale sample is harmless.

use crate::config::MonitorConfig;
use crate::shared::{ElapsedTime, RawSample};

/// Signal level relative to the threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Level {
    #[default]
    Below,
    Above,
}

/// A qualifying rising edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeatEvent {
    pub at: ElapsedTime,
}

/// State change produced by one evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// BELOW→ABOVE. `beat` is `None` when the refractory window suppressed it.
    Rising { beat: Option<BeatEvent> },
    /// ABOVE→BELOW.
    Falling,
}

impl Transition {
    #[inline]
    pub const fn beat(self) -> Option<BeatEvent> {
        match self {
            Self::Rising { beat } => beat,
            Self::Falling => None,
        }
    }
}

/// Threshold edge detector with optional hysteresis and refractory gate.
pub struct BeatDetector {
    level: Level,
    threshold: RawSample,
    hysteresis: RawSample,
    refractory: Option<ElapsedTime>,
    last_beat: Option<ElapsedTime>,
}

impl BeatDetector {
    pub const fn new(config: &MonitorConfig) -> Self {
        let refractory = match config.refractory_ms {
            Some(ms) => Some(ElapsedTime::from_millis(ms as u64)),
            None => None,
        };
        Self {
            level: Level::Below,
            threshold: config.threshold,
            hysteresis: config.hysteresis,
            refractory,
            last_beat: None,
        }
    }

    /// Current level.
    #[inline]
    pub const fn level(&self) -> Level { self.level }

    /// Compare `sample` against the threshold and update the level.
    pub fn evaluate(
        &mut self,
        sample: RawSample,
        now: ElapsedTime,
    ) -> Option<Transition> {
        match self.level {
            Level::Below if sample > self.threshold.saturating_add(self.hysteresis) => {
                self.level = Level::Above;
                let beat = if self.in_refractory(now) {
                    None
                } else {
                    self.last_beat = Some(now);
                    Some(BeatEvent { at: now })
                };
                Some(Transition::Rising { beat })
            }
            Level::Above if sample < self.threshold.saturating_sub(self.hysteresis) => {
                self.level = Level::Below;
                Some(Transition::Falling)
            }
            _ => None,
        }
    }

    fn in_refractory(
        &self,
        now: ElapsedTime,
    ) -> bool {
        match (self.refractory, self.last_beat) {
            (Some(window), Some(last)) => now.since(last) < window,
            _ => false,
        }
    }

    /// Back to BELOW with no beat history.
    pub fn reset(&mut self) {
        self.level = Level::Below;
        self.last_beat = None;
    }
}
