//! Refresh-cycle latency statistics.
//!
//! While the display refreshes, the detector is not evaluated. The main loop
//! records each cycle's duration here so overruns of the configured bound are
//! visible in the logs.

/// Running statistics over measured refresh cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LatencyStats {
    bound_us: u32,
    last_us: u32,
    max_us: u32,
    samples: u32,
    overruns: u32,
}

impl LatencyStats {
    pub const fn new(bound_us: u32) -> Self {
        Self {
            bound_us,
            last_us: 0,
            max_us: 0,
            samples: 0,
            overruns: 0,
        }
    }

    /// Record one cycle. Returns true if it exceeded the bound.
    pub fn record(
        &mut self,
        duration_us: u32,
    ) -> bool {
        self.last_us = duration_us;
        self.max_us = self.max_us.max(duration_us);
        self.samples = self.samples.saturating_add(1);

        let overrun = duration_us > self.bound_us;
        if overrun {
            self.overruns = self.overruns.saturating_add(1);
        }
        overrun
    }

    #[inline]
    pub const fn bound_us(&self) -> u32 { self.bound_us }

    #[inline]
    pub const fn last_us(&self) -> u32 { self.last_us }

    #[inline]
    pub const fn max_us(&self) -> u32 { self.max_us }

    #[inline]
    pub const fn samples(&self) -> u32 { self.samples }

    #[inline]
    pub const fn overruns(&self) -> u32 { self.overruns }

    /// Start a new reporting window (bound is kept).
    pub fn reset(&mut self) { *self = Self::new(self.bound_us); }
}
