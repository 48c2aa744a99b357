//! State shared between the interrupt-level handlers and the main loop.
//!
//! - `clock`: Elapsed-time accumulator (tick handler → main loop)
//! - `sample`: Latest raw sample (sample handler → main loop)
//!
//! Each cell has exactly one writer and one reader. `SharedSignals` bundles
//! them with the run flag so firmware can keep everything in one `static`.

mod clock;
mod sample;

use core::sync::atomic::{AtomicBool, Ordering};

pub use clock::{ElapsedClock, ElapsedTime};
pub use sample::{RawSample, SampleCell, SampleSnapshot};

/// Interrupt-shared state of the monitor.
pub struct SharedSignals {
    pub clock: ElapsedClock,
    pub sample: SampleCell,
    running: AtomicBool,
}

impl SharedSignals {
    pub const fn new(tick_quantum_us: u64) -> Self {
        Self {
            clock: ElapsedClock::new(tick_quantum_us),
            sample: SampleCell::new(),
            running: AtomicBool::new(true),
        }
    }

    /// False once a stop has been requested; handlers and the loop wind down.
    #[inline]
    pub fn is_running(&self) -> bool { self.running.load(Ordering::Acquire) }

    /// Ask every context to stop. Idempotent.
    #[inline]
    pub fn request_stop(&self) { self.running.store(false, Ordering::Release); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TICK_QUANTUM_US;

    #[test]
    fn test_new_is_running() {
        let signals = SharedSignals::new(TICK_QUANTUM_US);
        assert!(signals.is_running());
        assert_eq!(signals.clock.read(), ElapsedTime::ZERO);
        assert_eq!(signals.sample.latest().seq, 0);
    }

    #[test]
    fn test_request_stop_is_idempotent() {
        let signals = SharedSignals::new(TICK_QUANTUM_US);
        signals.request_stop();
        signals.request_stop();
        assert!(!signals.is_running());
    }

    #[test]
    fn test_static_placement() {
        static SIGNALS: SharedSignals = SharedSignals::new(TICK_QUANTUM_US);
        SIGNALS.clock.on_tick();
        SIGNALS.sample.publish(1234);
        assert_eq!(SIGNALS.clock.read().as_micros(), TICK_QUANTUM_US);
        assert_eq!(SIGNALS.sample.latest().value, 1234);
    }
}
