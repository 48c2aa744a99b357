//! CPU cycle counter utilities using Cortex-M33 DWT.
//!
//! Used to time display refresh cycles on the device.
//!
//! # Overflow Handling
//!
//! The CYCCNT is a 32-bit counter that wraps every ~28.6 s at 150 MHz.
//! `elapsed` uses `wrapping_sub`, which is correct for intervals shorter than
//! one wrap; a refresh cycle is a few milliseconds.

use core::sync::atomic::{AtomicU32, Ordering};

/// CPU frequency in Hz (set at init). Default to 150 MHz (stock RP2350).
static CPU_FREQ_HZ: AtomicU32 = AtomicU32::new(150_000_000);

/// Maximum valid cycle count for sanity checking (~1.3 s at 150 MHz).
/// Anything larger is treated as a measurement error.
const MAX_SANE_CYCLES: u32 = 200_000_000;

/// Initialize DWT cycle counter.
///
/// Must be called after `embassy_rp::init()`. Safe to call multiple times.
pub fn init(freq_hz: u32) {
    let clamped_freq = freq_hz.clamp(1_000_000, 500_000_000);
    CPU_FREQ_HZ.store(clamped_freq, Ordering::Relaxed);

    // DEMCR.TRCENA (bit 24) must be set first, then DWT.CTRL.CYCCNTENA (bit 0)
    #[cfg(target_arch = "arm")]
    unsafe {
        use core::ptr::{read_volatile, write_volatile};

        const DEMCR: *mut u32 = 0xE000_EDFC as *mut u32;
        let demcr_val = read_volatile(DEMCR);
        write_volatile(DEMCR, demcr_val | (1 << 24));

        const DWT_CTRL: *mut u32 = 0xE000_1000 as *mut u32;
        let ctrl_val = read_volatile(DWT_CTRL);
        write_volatile(DWT_CTRL, ctrl_val | 1);
    }
}

/// Read current cycle count (32-bit, wraps).
#[inline]
pub fn read() -> u32 {
    #[cfg(target_arch = "arm")]
    unsafe {
        // DWT CYCCNT register
        const DWT_CYCCNT: *const u32 = 0xE000_1004 as *const u32;
        core::ptr::read_volatile(DWT_CYCCNT)
    }
    #[cfg(not(target_arch = "arm"))]
    {
        0 // Placeholder for tests
    }
}

/// Elapsed cycles with wrap handling; 0 if the result is not plausible.
#[inline]
pub fn elapsed(
    start: u32,
    end: u32,
) -> u32 {
    let elapsed = end.wrapping_sub(start);
    if elapsed > MAX_SANE_CYCLES { 0 } else { elapsed }
}

/// Get configured CPU frequency in Hz.
#[inline]
pub fn freq_hz() -> u32 { CPU_FREQ_HZ.load(Ordering::Relaxed) }

/// Convert a cycle count to microseconds at the configured frequency.
///
/// Uses 64-bit intermediate arithmetic.
pub fn cycles_to_us(cycles: u32) -> u32 {
    let freq = u64::from(freq_hz());
    ((u64::from(cycles) * 1_000_000) / freq) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_normal() {
        assert_eq!(elapsed(100, 200), 100);
        assert_eq!(elapsed(0, 1000), 1000);
    }

    #[test]
    fn test_elapsed_wrap() {
        assert_eq!(elapsed(u32::MAX - 100, 100), 201);
    }

    #[test]
    fn test_elapsed_sanity_check() {
        assert_eq!(elapsed(0, MAX_SANE_CYCLES + 1), 0);
    }

    #[test]
    fn test_cycles_to_us() {
        init(150_000_000);
        // 7.5 ms refresh cycle at 150 MHz
        assert_eq!(cycles_to_us(1_125_000), 7_500);
        assert_eq!(cycles_to_us(0), 0);
        assert_eq!(cycles_to_us(MAX_SANE_CYCLES), 1_333_333);
    }
}
