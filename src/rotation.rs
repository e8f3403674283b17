#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::mode::{AnimationState, ModeSlot};

/// Number of distinct rotation positions
pub const ROTATION_SPAN: u8 = 6;

/// Rotation index derived from the hour of day
pub const fn rotation_for_hour(hour: u8) -> u8 {
    hour % ROTATION_SPAN
}

/// Detects hour-boundary crossings
#[derive(Debug, Clone)]
pub struct HourRotationTracker {
    last_hour: u8,
}

impl HourRotationTracker {
    pub const fn new(hour: u8) -> Self {
        Self { last_hour: hour }
    }

    /// Record the current hour
    ///
    /// On a change, rotation-eligible modes get a new rotation index and
    /// `true` is returned to request a refresh.
    pub fn poll(&mut self, hour: u8, mode: &ModeSlot, state: &mut AnimationState) -> bool {
        if hour == self.last_hour {
            return false;
        }
        self.last_hour = hour;
        if !mode.rotates_hourly() {
            return false;
        }

        state.rotation = rotation_for_hour(hour);
        #[cfg(feature = "esp32-log")]
        println!(
            "[HourRotationTracker.poll] hour {}, rotation {}",
            hour, state.rotation
        );
        true
    }
}
