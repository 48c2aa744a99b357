//! Virtual board: simulated time, interrupt sources and display lines.
//!
//! `VirtualTime` stands in for the tick timer and the ADC. Every time the main
//! loop spends time (including the display dwell through `DelayNs`), the tick
//! and sample handlers that fall due are run in time order, exactly as the
//! interrupts would preempt the loop on hardware.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use pulse_common::{
    DIGIT_COUNT,
    DisplayConfig,
    ElapsedTime,
    SAMPLE_INTERVAL_US,
    SEGMENT_COUNT,
    SegmentMask,
    SharedSignals,
    SyntheticPulse,
};

// =============================================================================
// Virtual Time
// =============================================================================

pub struct VirtualTime<'a> {
    signals: &'a SharedSignals,
    source: SyntheticPulse,
    now_us: u64,
    next_tick_us: u64,
    next_sample_us: u64,
    ticks: u64,
    samples: u64,
}

impl<'a> VirtualTime<'a> {
    pub fn new(
        signals: &'a SharedSignals,
        source: SyntheticPulse,
    ) -> Self {
        Self {
            signals,
            source,
            now_us: 0,
            next_tick_us: signals.clock.quantum().as_micros(),
            next_sample_us: 0,
            ticks: 0,
            samples: 0,
        }
    }

    /// Spend `us` of virtual time, running every handler that falls due.
    ///
    /// Handlers stop firing once a stop has been requested.
    pub fn advance(
        &mut self,
        us: u64,
    ) {
        let target = self.now_us.saturating_add(us);
        while self.signals.is_running() {
            let next = self.next_tick_us.min(self.next_sample_us);
            if next > target {
                break;
            }
            self.now_us = next;

            if self.next_sample_us == next {
                let value = self.source.sample_at(ElapsedTime::from_micros(next));
                self.signals.sample.publish(value);
                self.samples += 1;
                self.next_sample_us += SAMPLE_INTERVAL_US;
            }
            if self.next_tick_us == next {
                self.signals.clock.on_tick();
                self.ticks += 1;
                self.next_tick_us += self.signals.clock.quantum().as_micros();
            }
        }
        self.now_us = target;
    }

    /// Wall time of the simulation (not the tick-quantized clock).
    #[inline]
    pub fn now(&self) -> ElapsedTime { ElapsedTime::from_micros(self.now_us) }

    #[inline]
    pub fn ticks(&self) -> u64 { self.ticks }

    #[inline]
    pub fn samples(&self) -> u64 { self.samples }
}

impl DelayNs for VirtualTime<'_> {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        self.advance(u64::from(ns).div_ceil(1_000));
    }
}

// =============================================================================
// Display Lines
// =============================================================================

const LINE_COUNT: usize = SEGMENT_COUNT + DIGIT_COUNT;

/// Electrical state of every display line plus what each digit last showed.
struct LineState {
    config: DisplayConfig,
    high: [bool; LINE_COUNT],
    latched: [SegmentMask; DIGIT_COUNT],
    max_selected: usize,
}

impl LineState {
    fn new(config: DisplayConfig) -> Self {
        let mut high = [config.segment_polarity.level(false); LINE_COUNT];
        for level in &mut high[SEGMENT_COUNT..] {
            *level = config.select_polarity.level(false);
        }
        Self {
            config,
            high,
            latched: [SegmentMask::BLANK; DIGIT_COUNT],
            max_selected: 0,
        }
    }

    fn is_on(
        &self,
        line: usize,
    ) -> bool {
        let polarity = if line < SEGMENT_COUNT {
            self.config.segment_polarity
        } else {
            self.config.select_polarity
        };
        self.high[line] == polarity.level(true)
    }

    fn segments(&self) -> SegmentMask {
        let bits = (0..SEGMENT_COUNT)
            .filter(|&line| self.is_on(line))
            .fold(0u8, |acc, line| acc | (1 << line));
        SegmentMask::from_bits(bits)
    }

    fn set(
        &mut self,
        line: usize,
        high: bool,
    ) {
        self.high[line] = high;

        let selected: Vec<usize> = (0..DIGIT_COUNT)
            .filter(|&position| self.is_on(SEGMENT_COUNT + position))
            .collect();
        self.max_selected = self.max_selected.max(selected.len());

        // Whatever the segment lines carry while a digit is selected is what it shows
        let segments = self.segments();
        for position in selected {
            self.latched[position] = segments;
        }
    }
}

/// Observer side of the simulated display lines.
#[derive(Clone)]
pub struct DisplayLines {
    state: Rc<RefCell<LineState>>,
}

impl DisplayLines {
    /// Last pattern each position showed, in refresh order (units first).
    pub fn latched(&self) -> [SegmentMask; DIGIT_COUNT] { self.state.borrow().latched }

    /// Most select lines ever on at the same time.
    pub fn max_selected(&self) -> usize { self.state.borrow().max_selected }

    /// Number of lines currently on.
    pub fn lit_lines(&self) -> usize {
        let state = self.state.borrow();
        (0..LINE_COUNT).filter(|&line| state.is_on(line)).count()
    }
}

/// One simulated GPIO output.
pub struct SimPin {
    line: usize,
    state: Rc<RefCell<LineState>>,
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().set(self.line, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().set(self.line, true);
        Ok(())
    }
}

/// Create the segment pins (A-G), select pins (units, tens, hundreds) and
/// an observer for all of them.
pub fn display_pins(config: DisplayConfig) -> ([SimPin; SEGMENT_COUNT], [SimPin; DIGIT_COUNT], DisplayLines) {
    let state = Rc::new(RefCell::new(LineState::new(config)));
    let segments = core::array::from_fn(|line| SimPin {
        line,
        state: Rc::clone(&state),
    });
    let selects = core::array::from_fn(|position| SimPin {
        line: SEGMENT_COUNT + position,
        state: Rc::clone(&state),
    });
    (segments, selects, DisplayLines { state })
}

#[cfg(test)]
mod tests {
    use pulse_common::{BpmEstimate, MonitorConfig, MultiplexedDisplay, PulseMonitor, SampleSnapshot, TICK_QUANTUM_US};

    use super::*;
    use crate::timing::LOOP_OVERHEAD_US;

    /// Main loop as on the device: poll, then one blocking refresh cycle.
    fn run_with_refresh(
        bpm: u32,
        secs: u64,
    ) -> PulseMonitor {
        let signals = SharedSignals::new(TICK_QUANTUM_US);
        let mut time = VirtualTime::new(&signals, SyntheticPulse::new(bpm));
        let (segments, selects, lines) = display_pins(DisplayConfig::new());
        let mut display = MultiplexedDisplay::new(segments, selects, DisplayConfig::new());
        let mut monitor = PulseMonitor::new(MonitorConfig::reference());

        let end = ElapsedTime::from_millis(secs * 1_000);
        while time.now() < end {
            let outcome = monitor.poll(&signals);
            time.advance(LOOP_OVERHEAD_US);
            display.refresh(outcome.estimate, &mut time).ok();
        }
        assert_eq!(lines.max_selected(), 1);
        monitor
    }

    /// Same waveform evaluated every sample with no display pauses.
    fn run_unpaused(
        bpm: u32,
        secs: u64,
    ) -> PulseMonitor {
        let mut source = SyntheticPulse::new(bpm);
        let mut monitor = PulseMonitor::new(MonitorConfig::reference());
        for (seq, t) in (0..secs * 1_000).enumerate() {
            let now = ElapsedTime::from_millis(t);
            let sample = SampleSnapshot {
                value: source.sample_at(now),
                seq: seq as u16,
            };
            monitor.step(sample, now);
        }
        monitor
    }

    #[test]
    fn test_advance_fires_ticks_and_samples() {
        let signals = SharedSignals::new(TICK_QUANTUM_US);
        let mut time = VirtualTime::new(&signals, SyntheticPulse::new(60));

        time.advance(100_000);
        // Ticks at 10.048 ms .. 90.432 ms; samples at 0 .. 100 ms
        assert_eq!(time.ticks(), 9);
        assert_eq!(time.samples(), 101);
        assert_eq!(signals.clock.read().as_micros(), 9 * TICK_QUANTUM_US);
        assert_eq!(signals.sample.latest().seq, 101);
        assert_eq!(time.now(), ElapsedTime::from_millis(100));
    }

    #[test]
    fn test_delay_advances_time() {
        let signals = SharedSignals::new(TICK_QUANTUM_US);
        let mut time = VirtualTime::new(&signals, SyntheticPulse::new(60));
        time.delay_us(2_500);
        assert_eq!(time.now().as_micros(), 2_500);
    }

    #[test]
    fn test_stop_halts_handlers() {
        let signals = SharedSignals::new(TICK_QUANTUM_US);
        let mut time = VirtualTime::new(&signals, SyntheticPulse::new(60));
        time.advance(50_000);
        let ticks = time.ticks();

        signals.request_stop();
        time.advance(50_000);
        assert_eq!(time.ticks(), ticks);
        assert_eq!(time.now(), ElapsedTime::from_millis(100));
    }

    #[test]
    fn test_lines_latch_refresh() {
        let signals = SharedSignals::new(TICK_QUANTUM_US);
        let mut time = VirtualTime::new(&signals, SyntheticPulse::new(60));
        let (segments, selects, lines) = display_pins(DisplayConfig::new());
        let mut display = MultiplexedDisplay::new(segments, selects, DisplayConfig::new());

        display.refresh(BpmEstimate::Rate(72.0), &mut time).ok();

        let latched = lines.latched();
        assert_eq!(Some(latched[0]), SegmentMask::for_digit(2));
        assert_eq!(Some(latched[1]), SegmentMask::for_digit(7));
        assert_eq!(Some(latched[2]), SegmentMask::for_digit(0));
        assert_eq!(lines.max_selected(), 1);
        assert_eq!(lines.lit_lines(), 0);
        assert_eq!(time.now().as_micros(), 7_500);
    }

    #[test]
    fn test_common_anode_lines_start_off() {
        let (_, _, lines) = display_pins(DisplayConfig::common_anode());
        assert_eq!(lines.lit_lines(), 0);
    }

    #[test]
    fn test_refresh_pauses_lose_no_beats() {
        for bpm in [40, 72, 200] {
            let paused = run_with_refresh(bpm, 30);
            let reference = run_unpaused(bpm, 30);
            assert!(
                paused.beat_count().abs_diff(reference.beat_count()) <= 1,
                "{bpm} BPM: {} beats with refresh, {} without",
                paused.beat_count(),
                reference.beat_count(),
            );

            let estimate = paused.estimate().rate().unwrap();
            assert!((estimate - bpm as f32).abs() < 3.0, "{bpm} BPM: estimate {estimate}");
        }
    }
}
