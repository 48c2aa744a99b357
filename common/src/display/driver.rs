//! Time-multiplexed driver for a three-digit seven-segment display.
//!
//! # Refresh Cycle
//!
//! For each position in refresh order (units, tens, hundreds):
//!
//! 1. drive the segment lines with that digit's pattern (select still off)
//! 2. assert that digit's select line
//! 3. hold for `dwell_us` (busy wait through `DelayNs`)
//! 4. de-assert the select line, then every segment line
//!
//! Steps 1-2 and step 4 each run inside a critical section so an interrupt
//! never observes (or interleaves with) a half-written set of lines. At most one
//! select line is asserted at any instant.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use super::digits::Frame;
use super::segments::SegmentMask;
use crate::config::{DIGIT_COUNT, DisplayConfig, Polarity, SEGMENT_COUNT};
use crate::pulse::BpmEstimate;

/// Drive one line on or off according to its polarity.
#[inline]
fn drive<P: OutputPin>(
    pin: &mut P,
    on: bool,
    polarity: Polarity,
) -> Result<(), P::Error> {
    if polarity.level(on) { pin.set_high() } else { pin.set_low() }
}

/// Multiplexed display over seven segment lines and three select lines.
pub struct MultiplexedDisplay<P> {
    segments: [P; SEGMENT_COUNT],
    selects: [P; DIGIT_COUNT],
    config: DisplayConfig,
    cycles: u32,
}

impl<P: OutputPin> MultiplexedDisplay<P> {
    /// Segment lines ordered A-G; select lines ordered units, tens, hundreds.
    pub const fn new(
        segments: [P; SEGMENT_COUNT],
        selects: [P; DIGIT_COUNT],
        config: DisplayConfig,
    ) -> Self {
        Self {
            segments,
            selects,
            config,
            cycles: 0,
        }
    }

    /// Put every line into its off state.
    pub fn init(&mut self) -> Result<(), P::Error> { self.blank() }

    /// Run one full refresh cycle showing `estimate`.
    ///
    /// Blocks for `DIGIT_COUNT × dwell_us` plus switching time.
    pub fn refresh<D: DelayNs>(
        &mut self,
        estimate: BpmEstimate,
        delay: &mut D,
    ) -> Result<(), P::Error> {
        // Snapshot once: every position below derives from this one value
        let patterns = Frame::from_estimate(estimate).patterns();

        for (position, pattern) in patterns.into_iter().enumerate() {
            self.show(position, pattern)?;
            delay.delay_us(self.config.dwell_us);
            self.hide(position)?;
        }

        self.cycles = self.cycles.wrapping_add(1);
        Ok(())
    }

    fn show(
        &mut self,
        position: usize,
        pattern: SegmentMask,
    ) -> Result<(), P::Error> {
        let config = self.config;
        critical_section::with(|_| {
            for (index, pin) in self.segments.iter_mut().enumerate() {
                drive(pin, pattern.is_lit(index), config.segment_polarity)?;
            }
            drive(&mut self.selects[position], true, config.select_polarity)
        })
    }

    fn hide(
        &mut self,
        position: usize,
    ) -> Result<(), P::Error> {
        let config = self.config;
        critical_section::with(|_| {
            drive(&mut self.selects[position], false, config.select_polarity)?;
            for pin in &mut self.segments {
                drive(pin, false, config.segment_polarity)?;
            }
            Ok(())
        })
    }

    /// Turn every select and segment line off.
    pub fn blank(&mut self) -> Result<(), P::Error> {
        let config = self.config;
        critical_section::with(|_| {
            for pin in &mut self.selects {
                drive(pin, false, config.select_polarity)?;
            }
            for pin in &mut self.segments {
                drive(pin, false, config.segment_polarity)?;
            }
            Ok(())
        })
    }

    /// Completed refresh cycles (wrapping).
    #[inline]
    pub const fn cycles(&self) -> u32 { self.cycles }

    #[inline]
    pub const fn config(&self) -> &DisplayConfig { &self.config }
}

// =============================================================================
// Unit Tests
// =============================================================================
