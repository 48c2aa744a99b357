//! Elapsed-time accumulator driven by the periodic tick.
//!
//! # Tearing
//!
//! Elapsed time is a 64-bit microsecond count. On a 32-bit core a 64-bit
//! store is two word writes, so a reader preempted between them by the tick
//! handler (or a reader that preempts the tick handler) could see half of an
//! update. Both sides therefore go through a critical-section mutex; the
//! critical section is a handful of instructions long.
//!
//! # Overflow
//!
//! The counter saturates at `u64::MAX` microseconds instead of wrapping.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Monotonic time since power-on (or since an arbitrary start), in microseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElapsedTime(u64);

impl ElapsedTime {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn from_micros(us: u64) -> Self { Self(us) }

    #[inline]
    pub const fn from_millis(ms: u64) -> Self { Self(ms.saturating_mul(1_000)) }

    #[inline]
    pub const fn as_micros(self) -> u64 { self.0 }

    #[inline]
    pub const fn as_millis(self) -> u64 { self.0 / 1_000 }

    /// Milliseconds with the sub-millisecond part kept (for display/logging).
    #[inline]
    pub fn as_millis_f32(self) -> f32 { self.0 as f32 / 1_000.0 }

    /// Time from `earlier` to `self`, zero if `earlier` is later.
    #[inline]
    pub const fn since(
        self,
        earlier: Self,
    ) -> Self {
        Self(self.0.saturating_sub(earlier.0))
    }

    #[inline]
    pub const fn saturating_add(
        self,
        other: Self,
    ) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

/// Accumulates one fixed quantum per tick event.
///
/// Written only by the tick handler, read by the main loop.
pub struct ElapsedClock {
    micros: Mutex<CriticalSectionRawMutex, Cell<u64>>,
    quantum_us: u64,
}

impl ElapsedClock {
    /// Create a clock at zero that advances `quantum_us` per tick.
    pub const fn new(quantum_us: u64) -> Self {
        Self {
            micros: Mutex::new(Cell::new(0)),
            quantum_us,
        }
    }

    /// Tick handler entry point: add exactly one quantum.
    #[inline]
    pub fn on_tick(&self) {
        self.micros.lock(|micros| {
            micros.set(micros.get().saturating_add(self.quantum_us));
        });
    }

    /// Consistent snapshot of the elapsed time.
    #[inline]
    pub fn read(&self) -> ElapsedTime { ElapsedTime(self.micros.lock(Cell::get)) }

    /// Real-world period represented by one tick.
    #[inline]
    pub const fn quantum(&self) -> ElapsedTime { ElapsedTime(self.quantum_us) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TICK_QUANTUM_US;

    #[test]
    fn test_starts_at_zero() {
        let clock = ElapsedClock::new(TICK_QUANTUM_US);
        assert_eq!(clock.read(), ElapsedTime::ZERO);
    }

    #[test]
    fn test_n_ticks_is_exact_multiple() {
        let clock = ElapsedClock::new(TICK_QUANTUM_US);
        for _ in 0..100_000 {
            clock.on_tick();
        }
        assert_eq!(clock.read().as_micros(), 100_000 * TICK_QUANTUM_US);
    }

    #[test]
    fn test_reads_are_monotonic() {
        let clock = ElapsedClock::new(TICK_QUANTUM_US);
        let mut prev = clock.read();
        for _ in 0..1_000 {
            clock.on_tick();
            let now = clock.read();
            assert!(now > prev);
            prev = now;
        }
    }

    #[test]
    fn test_saturates_instead_of_wrapping() {
        let clock = ElapsedClock::new(u64::MAX / 2 + 1);
        clock.on_tick();
        clock.on_tick();
        clock.on_tick();
        assert_eq!(clock.read().as_micros(), u64::MAX);
    }

    #[test]
    fn test_since_is_saturating() {
        let a = ElapsedTime::from_millis(800);
        let b = ElapsedTime::from_millis(1_000);
        assert_eq!(b.since(a), ElapsedTime::from_millis(200));
        assert_eq!(a.since(b), ElapsedTime::ZERO);
    }

    #[test]
    fn test_unit_conversions() {
        let t = ElapsedTime::from_micros(10_048);
        assert_eq!(t.as_millis(), 10);
        assert!((t.as_millis_f32() - 10.048).abs() < 0.0001);
        assert_eq!(ElapsedTime::from_millis(5).as_micros(), 5_000);
    }

    #[test]
    fn test_shared_across_threads() {
        // Host stand-in for handler/loop concurrency: every read must be a
        // whole number of quanta, never a half-written value.
        use std::sync::Arc;
        use std::thread;

        let clock = Arc::new(ElapsedClock::new(TICK_QUANTUM_US));
        let writer = {
            let clock = Arc::clone(&clock);
            thread::spawn(move || {
                for _ in 0..50_000 {
                    clock.on_tick();
                }
            })
        };
        let mut prev = 0;
        for _ in 0..50_000 {
            let now = clock.read().as_micros();
            assert_eq!(now % TICK_QUANTUM_US, 0);
            assert!(now >= prev);
            prev = now;
        }
        writer.join().unwrap();
        assert_eq!(clock.read().as_micros(), 50_000 * TICK_QUANTUM_US);
    }
}
