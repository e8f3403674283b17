use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::bounds::LED_COUNT;
use crate::color::{OFF, Rgb, scale_color};
use crate::mode::{AnimationState, ModeSlot};
use crate::pattern::LitMask;
use crate::transition::{MaskTransition, TransitionTimings};

/// Owns the frame buffer and is the only place that changes what is lit
pub struct Renderer<O: OutputDriver> {
    output: O,
    timings: TransitionTimings,
    frame: [Rgb; LED_COUNT],
    current: LitMask,
    transition: Option<MaskTransition>,
}

impl<O: OutputDriver> Renderer<O> {
    pub fn new(output: O, timings: TransitionTimings) -> Self {
        Self {
            output,
            timings,
            frame: [OFF; LED_COUNT],
            current: LitMask::empty(),
            transition: None,
        }
    }

    /// Mask currently shown (the target once a transition has finished)
    pub const fn current_mask(&self) -> &LitMask {
        &self.current
    }

    pub const fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Last frame written to the output
    pub const fn frame(&self) -> &[Rgb; LED_COUNT] {
        &self.frame
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    /// Start cross-fading to `target`
    ///
    /// A transition still in flight is cut short and its target taken as
    /// the starting point.
    pub fn begin(&mut self, target: LitMask, snapshot: AnimationState, now: Instant) {
        if let Some(previous) = self.transition.take() {
            self.current = *previous.target();
        }
        #[cfg(feature = "esp32-log")]
        println!("[Renderer.begin] starting transition");
        self.transition = Some(MaskTransition::new(
            &self.current,
            target,
            snapshot,
            self.timings,
            now,
        ));
    }

    /// Emit the transition frame due at `now`
    ///
    /// Returns the deadline of the next frame while a transition is in
    /// flight, `None` once it has completed.
    pub fn advance(&mut self, now: Instant, mode: &ModeSlot) -> Option<Instant> {
        let transition = self.transition.as_mut()?;
        let Some(step) = transition.next_due(now) else {
            return Some(transition.next_step_at());
        };

        let snapshot = *transition.snapshot();
        for (index, pixel) in self.frame.iter_mut().enumerate() {
            let level = transition.level(index, step);
            *pixel = if level == 0 {
                OFF
            } else {
                scale_color(lit_color(&self.output, mode, index, &snapshot), level)
            };
        }
        self.output.write(&self.frame);

        if !transition.is_finished() {
            return Some(transition.next_step_at());
        }
        self.current = *transition.target();
        self.transition = None;
        None
    }

    /// Recolor every lit element with the live animation state, no fade
    pub fn refresh(&mut self, mode: &ModeSlot, state: &AnimationState) {
        for (index, pixel) in self.frame.iter_mut().enumerate() {
            *pixel = if self.current.is_lit(index) {
                lit_color(&self.output, mode, index, state)
            } else {
                OFF
            };
        }
        self.output.write(&self.frame);
    }
}

fn lit_color<O: OutputDriver>(
    output: &O,
    mode: &ModeSlot,
    index: usize,
    state: &AnimationState,
) -> Rgb {
    let color = mode.color_for(index, state);
    if mode.requires_gamma() {
        output.gamma(color)
    } else {
        color
    }
}
