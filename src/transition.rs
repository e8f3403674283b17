use embassy_time::{Duration, Instant};

use crate::bounds::LED_COUNT;
use crate::math8::fraction8;
use crate::mode::AnimationState;
use crate::pattern::LitMask;

const DEFAULT_STEPS: u8 = 15;
const DEFAULT_STEP_DELAY_MS: u64 = 40;

/// Configuration for mask cross-fades
#[derive(Debug, Clone, Copy)]
pub struct TransitionTimings {
    /// Number of interpolation steps; `steps + 1` frames are emitted
    pub steps: u8,
    /// Delay between two frames
    pub step_delay: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            step_delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
        }
    }
}

/// How a single element behaves across a mask change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    /// Unlit before and after
    Off,
    /// Lit before, unlit after
    Out,
    /// Unlit before, lit after
    In,
    /// Lit before and after; never dimmed
    Steady,
}

impl Fade {
    pub const fn between(was_lit: bool, will_lit: bool) -> Self {
        match (was_lit, will_lit) {
            (false, false) => Self::Off,
            (true, false) => Self::Out,
            (false, true) => Self::In,
            (true, true) => Self::Steady,
        }
    }

    /// Intensity (0-255) at `step` of `steps`
    pub const fn level(self, step: u8, steps: u8) -> u8 {
        match self {
            Self::Off => 0,
            Self::Out => 255 - fraction8(step, steps),
            Self::In => fraction8(step, steps),
            Self::Steady => 255,
        }
    }
}

/// Cross-fade between two lit masks
///
/// Colors are looked up with the animation state frozen at the start, so
/// animated modes never jump mid-fade.
#[derive(Debug, Clone)]
pub struct MaskTransition {
    fades: [Fade; LED_COUNT],
    target: LitMask,
    snapshot: AnimationState,
    timings: TransitionTimings,
    /// Next step to emit
    step: u8,
    next_step_at: Instant,
}

impl MaskTransition {
    pub fn new(
        from: &LitMask,
        target: LitMask,
        snapshot: AnimationState,
        timings: TransitionTimings,
        now: Instant,
    ) -> Self {
        let mut fades = [Fade::Off; LED_COUNT];
        for (index, fade) in fades.iter_mut().enumerate() {
            *fade = Fade::between(from.is_lit(index), target.is_lit(index));
        }
        Self {
            fades,
            target,
            snapshot,
            timings,
            step: 0,
            next_step_at: now,
        }
    }

    pub const fn target(&self) -> &LitMask {
        &self.target
    }

    /// Animation state captured when the transition began
    pub const fn snapshot(&self) -> &AnimationState {
        &self.snapshot
    }

    pub const fn next_step_at(&self) -> Instant {
        self.next_step_at
    }

    /// All frames have been emitted
    pub const fn is_finished(&self) -> bool {
        self.step > self.timings.steps
    }

    /// Intensity of an element at a given step
    pub fn level(&self, index: usize, step: u8) -> u8 {
        self.fades
            .get(index)
            .map_or(0, |fade| fade.level(step, self.timings.steps))
    }

    /// Take the step due at `now`, if any
    ///
    /// Falls back to pacing from `now` when more than two steps behind, so a
    /// late caller does not get a burst of frames.
    pub fn next_due(&mut self, now: Instant) -> Option<u8> {
        if self.is_finished() || now < self.next_step_at {
            return None;
        }
        let max_drift = self.timings.step_delay + self.timings.step_delay;
        if now > self.next_step_at + max_drift {
            self.next_step_at = now;
        }

        let step = self.step;
        self.step += 1;
        self.next_step_at += self.timings.step_delay;
        Some(step)
    }
}
