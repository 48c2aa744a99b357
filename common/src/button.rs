//! Button debounce handling.
//!
//! Time-based edge detection with debouncing to prevent multiple triggers
//! from contact bounce. Time comes from the monitor's own elapsed clock, so
//! this works identically on the device, in the simulator and in tests.

use crate::shared::ElapsedTime;

/// Debounce duration in milliseconds.
pub const DEBOUNCE_MS: u64 = 50;

/// Button debounce state with time-based edge detection.
pub struct ButtonState {
    was_pressed: bool,
    last_change: Option<ElapsedTime>,
}

impl ButtonState {
    /// Create a new button state (not pressed).
    pub const fn new() -> Self {
        Self {
            was_pressed: false,
            last_change: None,
        }
    }

    /// Returns true only on the press edge.
    ///
    /// Buttons are active-low, so `is_low` means pressed. A level change
    /// within `DEBOUNCE_MS` of the previous accepted change is ignored.
    pub fn just_pressed(
        &mut self,
        is_low: bool,
        now: ElapsedTime,
    ) -> bool {
        if is_low != self.was_pressed {
            if let Some(last) = self.last_change
                && now.since(last) < ElapsedTime::from_millis(DEBOUNCE_MS)
            {
                return false;
            }

            self.was_pressed = is_low;
            self.last_change = Some(now);

            return is_low;
        }

        false
    }
}

impl Default for ButtonState {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(ms: u64) -> ElapsedTime { ElapsedTime::from_millis(ms) }

    #[test]
    fn test_press_edge_only() {
        let mut button = ButtonState::new();
        assert!(!button.just_pressed(false, ms(0)));
        assert!(button.just_pressed(true, ms(10)));
        // Held down
        assert!(!button.just_pressed(true, ms(200)));
        // Released
        assert!(!button.just_pressed(false, ms(300)));
    }

    #[test]
    fn test_bounce_is_ignored() {
        let mut button = ButtonState::new();
        assert!(button.just_pressed(true, ms(100)));
        assert!(!button.just_pressed(false, ms(110)));
        assert!(!button.just_pressed(true, ms(120)));
        // Release after debounce, then press again
        assert!(!button.just_pressed(false, ms(200)));
        assert!(button.just_pressed(true, ms(260)));
    }
}
