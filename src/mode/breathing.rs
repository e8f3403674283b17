//! Breathing mode
//!
//! Same hue sampling as the chase modes, but the base hue swings back and
//! forth on `0.5 + 0.5 * sin(phase)` instead of running around the wheel.

use core::f32::consts::TAU;

use embassy_time::Duration;

use super::{AnimationState, ColorMode, spread_hue};
use crate::color::{Rgb, hue_wheel};

const INTERVAL_MS: u64 = 1720;
const PHASE_STEP: f32 = 0.1;

/// Base hue for a breathing phase
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn breath_hue(phase: f32) -> u16 {
    let level = 0.5 + 0.5 * libm::sinf(phase);
    (level * f32::from(u16::MAX)) as u16
}

#[derive(Debug, Clone)]
pub struct BreathingMode {
    interval: Duration,
}

impl Default for BreathingMode {
    fn default() -> Self {
        Self::new()
    }
}

impl BreathingMode {
    pub const fn new() -> Self {
        Self {
            interval: Duration::from_millis(INTERVAL_MS),
        }
    }
}

impl ColorMode for BreathingMode {
    const GAMMA_CORRECTED: bool = true;

    fn tick_interval(&self) -> Option<Duration> {
        Some(self.interval)
    }

    fn tick(&self, state: &mut AnimationState) {
        state.phase = libm::fmodf(state.phase + PHASE_STEP, TAU);
    }

    fn color_for(&self, index: usize, state: &AnimationState) -> Rgb {
        hue_wheel(spread_hue(breath_hue(state.phase), index))
    }
}
