//! Latest raw sample, published by the sample-ready handler.
//!
//! The 16-bit sample and a 16-bit publication sequence are packed into one
//! `AtomicU32`, so a reader always gets a value and the sequence number that
//! belongs to it. There is a single producer; it never needs a CAS.

use core::sync::atomic::{AtomicU32, Ordering};

/// Raw amplitude reading from the sample source.
pub type RawSample = u16;

/// Sample value together with its publication sequence number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SampleSnapshot {
    pub value: RawSample,
    /// Incremented (wrapping) on every publish; 0 means nothing published yet.
    pub seq: u16,
}

impl SampleSnapshot {
    /// Number of publications between `earlier` and `self` (wrap-aware).
    #[inline]
    pub const fn published_since(
        self,
        earlier: Self,
    ) -> u16 {
        self.seq.wrapping_sub(earlier.seq)
    }
}

/// Single-producer/single-consumer cell holding the latest sample.
pub struct SampleCell {
    word: AtomicU32,
}

impl SampleCell {
    pub const fn new() -> Self { Self { word: AtomicU32::new(0) } }

    /// Sample handler entry point: overwrite the latest value.
    #[inline]
    pub fn publish(
        &self,
        value: RawSample,
    ) {
        // Only the producer writes, so load + store cannot lose an update.
        let prev = self.word.load(Ordering::Relaxed);
        let seq = ((prev >> 16) as u16).wrapping_add(1);
        self.word.store((u32::from(seq) << 16) | u32::from(value), Ordering::Release);
    }

    /// Latest value and its sequence number.
    #[inline]
    pub fn latest(&self) -> SampleSnapshot {
        let word = self.word.load(Ordering::Acquire);
        SampleSnapshot {
            value: word as u16,
            seq: (word >> 16) as u16,
        }
    }
}

impl Default for SampleCell {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_snapshot() {
        let cell = SampleCell::new();
        assert_eq!(cell.latest(), SampleSnapshot { value: 0, seq: 0 });
    }

    #[test]
    fn test_publish_overwrites() {
        let cell = SampleCell::new();
        cell.publish(100);
        cell.publish(2_500);
        let snap = cell.latest();
        assert_eq!(snap.value, 2_500);
        assert_eq!(snap.seq, 2);
    }

    #[test]
    fn test_full_scale_value_does_not_leak_into_seq() {
        let cell = SampleCell::new();
        cell.publish(u16::MAX);
        assert_eq!(cell.latest(), SampleSnapshot { value: u16::MAX, seq: 1 });
    }

    #[test]
    fn test_sequence_wraps() {
        let cell = SampleCell::new();
        let before = cell.latest();
        for i in 0..70_000u32 {
            cell.publish((i % 4096) as u16);
        }
        let after = cell.latest();
        assert_eq!(after.seq, (70_000u32 % 65_536) as u16);
        assert_eq!(after.published_since(before), (70_000u32 % 65_536) as u16);
    }

    #[test]
    fn test_value_and_seq_stay_paired() {
        use std::sync::Arc;
        use std::thread;

        // Producer publishes value == seq % 4096; the reader checks the pairing.
        let cell = Arc::new(SampleCell::new());
        let writer = {
            let cell = Arc::clone(&cell);
            thread::spawn(move || {
                for i in 1..=40_000u32 {
                    cell.publish((i % 4096) as u16);
                }
            })
        };
        for _ in 0..40_000 {
            let snap = cell.latest();
            assert_eq!(snap.value, snap.seq % 4096);
        }
        writer.join().unwrap();
    }
}
