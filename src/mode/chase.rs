//! Hue chase modes
//!
//! Every element samples the hue wheel at its own offset from a shared
//! counter, so advancing the counter walks the rainbow across the face.

use embassy_time::Duration;

use super::{AnimationState, ColorMode};
use crate::{
    bounds::LED_COUNT,
    color::{Rgb, hue_wheel},
};

const FAST_INTERVAL_MS: u64 = 50;
const SLOW_INTERVAL_MS: u64 = 234;
const HUE_STEP: u16 = 256;

/// Hue distance between neighbouring elements (one turn across the face)
#[allow(clippy::cast_possible_truncation)]
pub const HUE_SPREAD: u16 = (65_536 / LED_COUNT) as u16;

/// Hue of an element given the shared base hue
#[allow(clippy::cast_possible_truncation)]
pub const fn spread_hue(base: u16, index: usize) -> u16 {
    base.wrapping_add((index as u16).wrapping_mul(HUE_SPREAD))
}

#[derive(Debug, Clone)]
pub struct ChaseMode {
    /// Time between hue steps
    interval: Duration,
    /// Hue advance per tick
    step: u16,
}

impl ChaseMode {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            step: HUE_STEP,
        }
    }

    pub const fn fast() -> Self {
        Self::new(Duration::from_millis(FAST_INTERVAL_MS))
    }

    pub const fn slow() -> Self {
        Self::new(Duration::from_millis(SLOW_INTERVAL_MS))
    }
}

impl ColorMode for ChaseMode {
    const GAMMA_CORRECTED: bool = true;

    fn tick_interval(&self) -> Option<Duration> {
        Some(self.interval)
    }

    fn tick(&self, state: &mut AnimationState) {
        state.hue = state.hue.wrapping_add(self.step);
    }

    fn color_for(&self, index: usize, state: &AnimationState) -> Rgb {
        hue_wheel(spread_hue(state.hue, index))
    }
}
