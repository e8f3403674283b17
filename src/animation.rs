use embassy_time::Instant;

use crate::mode::{AnimationState, ModeSlot};

/// Periodic driver for the continuously animated modes
#[derive(Debug, Clone)]
pub struct AnimationClock {
    last_tick: Instant,
}

impl AnimationClock {
    pub const fn new(now: Instant) -> Self {
        Self { last_tick: now }
    }

    /// Restart the tick period, used after a mode change
    pub fn restart(&mut self, now: Instant) {
        self.last_tick = now;
    }

    /// Advance the animation when the mode's interval has elapsed
    ///
    /// Returns `true` when the state changed and the face needs a refresh.
    pub fn poll(&mut self, now: Instant, mode: &ModeSlot, state: &mut AnimationState) -> bool {
        let Some(interval) = mode.tick_interval() else {
            return false;
        };
        if now.saturating_duration_since(self.last_tick) < interval {
            return false;
        }

        self.last_tick = now;
        mode.tick(state);
        true
    }
}
