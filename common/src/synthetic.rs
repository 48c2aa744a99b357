//! Deterministic PPG-like test waveform.
//!
//! Each beat period has a systolic peak that crosses the default threshold
//! followed by a smaller dicrotic wave that stays below it, then a flat
//! diastolic tail. Optional pseudo-random noise (xorshift32) is added on top
//! to provoke threshold chatter.

use core::f32::consts::PI;

use micromath::F32;

use crate::config::{ADC_FULL_SCALE, DEFAULT_THRESHOLD};
use crate::shared::{ElapsedTime, RawSample};

/// Fraction of the period taken by the systolic peak.
const SYSTOLIC_END: f32 = 0.30;

/// Fraction of the period at which the dicrotic wave has ended.
const DICROTIC_END: f32 = 0.60;

/// Dicrotic wave height relative to the systolic peak.
const DICROTIC_GAIN: f32 = 0.25;

/// Resting level of the waveform.
pub const SYNTHETIC_BASELINE: u16 = 1_800;

/// Systolic peak height above the baseline.
pub const SYNTHETIC_AMPLITUDE: u16 = 1_200;

// Peak must cross the threshold, the dicrotic wave must not
const _: () = assert!(SYNTHETIC_BASELINE + SYNTHETIC_AMPLITUDE > DEFAULT_THRESHOLD);
const _: () = assert!(SYNTHETIC_BASELINE + SYNTHETIC_AMPLITUDE / 4 < DEFAULT_THRESHOLD);

/// Normalised pulse shape for `phase` in [0, 1).
fn pulse_shape(phase: f32) -> f32 {
    if phase < SYSTOLIC_END {
        F32(PI * phase / SYSTOLIC_END).sin().0
    } else if phase < DICROTIC_END {
        DICROTIC_GAIN * F32(PI * (phase - SYSTOLIC_END) / (DICROTIC_END - SYSTOLIC_END)).sin().0
    } else {
        0.0
    }
}

/// Synthetic pulse source at a fixed rate.
#[derive(Clone, Debug)]
pub struct SyntheticPulse {
    period_us: u64,
    baseline: u16,
    amplitude: u16,
    noise: u16,
    rng: u32,
}

impl SyntheticPulse {
    /// Clean waveform at `bpm` beats per minute (at least 1).
    pub const fn new(bpm: u32) -> Self {
        let bpm = if bpm == 0 { 1 } else { bpm };
        Self {
            period_us: 60_000_000 / bpm as u64,
            baseline: SYNTHETIC_BASELINE,
            amplitude: SYNTHETIC_AMPLITUDE,
            noise: 0,
            rng: 0x2545_F491,
        }
    }

    /// Add uniform noise of ± `amplitude` counts.
    pub const fn with_noise(
        self,
        amplitude: u16,
    ) -> Self {
        Self { noise: amplitude, ..self }
    }

    /// Beat period.
    #[inline]
    pub const fn period(&self) -> ElapsedTime { ElapsedTime::from_micros(self.period_us) }

    /// Waveform value at time `t`, clamped to the ADC range.
    pub fn sample_at(
        &mut self,
        t: ElapsedTime,
    ) -> RawSample {
        let phase = (t.as_micros() % self.period_us) as f32 / self.period_us as f32;
        let clean = self.baseline as f32 + self.amplitude as f32 * pulse_shape(phase);
        let value = clean + self.next_noise();
        value.clamp(0.0, ADC_FULL_SCALE as f32) as RawSample
    }

    fn next_noise(&mut self) -> f32 {
        if self.noise == 0 {
            return 0.0;
        }
        self.rng ^= self.rng << 13;
        self.rng ^= self.rng >> 17;
        self.rng ^= self.rng << 5;
        let span = 2 * self.noise as u32 + 1;
        (self.rng % span) as f32 - self.noise as f32
    }
}
