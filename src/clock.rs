//! Main update loop
//!
//! Single-threaded and cooperative: every call to [`Clock::poll`] does one
//! pass and tells the caller how long it may sleep. While a transition is
//! fading, passes only emit its frames; buttons, hour rotation and
//! animation ticks wait until it has finished.
//!
//! # Usage
//!
//! ```ignore
//! let mut clock = Clock::new(rtc, strip, eeprom, EVENTS.sender(), &config, now)?;
//!
//! loop {
//!     let result = clock.poll(Instant::now(), &mut buttons);
//!     Timer::after(result.sleep_duration).await;
//! }
//! ```

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::animation::AnimationClock;
use crate::error::ClockError;
use crate::events::{ClockEvent, EventSender};
use crate::input::{
    Buttons, DEFAULT_DEBOUNCE, DEFAULT_FORMAT_HOLD, InputAction, InputController,
};
use crate::mode::{AnimationState, ModeId, ModeSlot};
use crate::pattern::PatternSelector;
use crate::renderer::Renderer;
use crate::rotation::{HourRotationTracker, rotation_for_hour};
use crate::settings::{Settings, SettingsStore};
use crate::time::{TimeFormat, TimeSource, WallTime};
use crate::transition::TransitionTimings;

/// Sleep between passes when nothing is scheduled sooner
pub const IDLE_POLL: Duration = Duration::from_millis(5);

const DEFAULT_BRIGHTNESS: u8 = 64;
const DEFAULT_SEED: u64 = 0x5eed_c10c;

/// Configuration for the clock engine
#[derive(Debug, Clone, Copy)]
pub struct ClockConfig {
    pub timings: TransitionTimings,
    /// Debounce window for every button
    pub debounce: Duration,
    /// Hold time of the hour-up + hour-down format toggle
    pub format_hold: Duration,
    /// Global display brightness, applied once at start
    pub brightness: u8,
    /// Seed for the digit pattern generator
    pub seed: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            timings: TransitionTimings::default(),
            debounce: DEFAULT_DEBOUNCE,
            format_hold: DEFAULT_FORMAT_HOLD,
            brightness: DEFAULT_BRIGHTNESS,
            seed: DEFAULT_SEED,
        }
    }
}

/// Result of a poll pass.
#[derive(Debug, Clone, Copy)]
pub struct PollResult {
    /// When the clock wants to be polled again.
    pub next_deadline: Instant,
    /// How long to wait until then (zero if already due).
    pub sleep_duration: Duration,
}

impl PollResult {
    fn until(deadline: Instant, now: Instant) -> Self {
        Self {
            next_deadline: deadline,
            sleep_duration: deadline.saturating_duration_since(now),
        }
    }

    fn idle(now: Instant) -> Self {
        Self::until(now + IDLE_POLL, now)
    }
}

/// Read-only snapshot for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockStatus {
    pub mode: ModeId,
    pub format: TimeFormat,
    pub rotation: u8,
    /// Hour (format-adjusted) and minute last sent to the face
    pub displayed: Option<(u8, u8)>,
}

/// Session state owned by the update loop
#[derive(Debug, Clone)]
struct SessionState {
    settings: Settings,
    animation: AnimationState,
    displayed: Option<(u8, u8)>,
}

/// The clock engine
pub struct Clock<'a, T, O, S, const EVENTS: usize>
where
    T: TimeSource,
    O: OutputDriver,
    S: SettingsStore,
{
    // External dependencies
    time: T,
    store: S,
    events: EventSender<'a, EVENTS>,

    // Internal state
    state: SessionState,
    mode: ModeSlot,

    // Internal dependencies
    renderer: Renderer<O>,
    selector: PatternSelector,
    input: InputController,
    animation_clock: AnimationClock,
    rotation: HourRotationTracker,
}

impl<'a, T, O, S, const EVENTS: usize> Clock<'a, T, O, S, EVENTS>
where
    T: TimeSource,
    O: OutputDriver,
    S: SettingsStore,
{
    /// Create the clock engine
    ///
    /// Fails when the time source does not respond; the caller must halt
    /// rather than show an unverified time.
    pub fn new(
        mut time: T,
        mut output: O,
        mut store: S,
        events: EventSender<'a, EVENTS>,
        config: &ClockConfig,
        now: Instant,
    ) -> Result<Self, ClockError> {
        time.probe()?;
        output.set_brightness(config.brightness);

        let settings = Settings::load(&mut store);
        let wall = time.now();
        #[cfg(feature = "esp32-log")]
        println!(
            "[Clock.new] mode {}, format {}",
            settings.mode.as_str(),
            settings.format.as_str()
        );

        Ok(Self {
            time,
            store,
            events,
            state: SessionState {
                settings,
                animation: AnimationState::new(rotation_for_hour(wall.hour)),
                displayed: None,
            },
            mode: settings.mode.to_slot(),
            renderer: Renderer::new(output, config.timings),
            selector: PatternSelector::new(config.seed),
            input: InputController::new(config.debounce, config.format_hold),
            animation_clock: AnimationClock::new(now),
            rotation: HourRotationTracker::new(wall.hour),
        })
    }

    /// Run one pass of the update loop
    ///
    /// The first pass renders the current time.
    pub fn poll<B: Buttons>(&mut self, now: Instant, buttons: &mut B) -> PollResult {
        if self.renderer.is_transitioning() {
            return self.advance(now);
        }

        let mut wall = self.time.now();
        if self.process_input(now, buttons, &mut wall) {
            return self.redraw(now, wall);
        }

        // A minute change redraws through the fade, which also carries any
        // new rotation or animation state; refresh only when the mask stays.
        let shown_minute = self.state.displayed.map(|(_, minute)| minute);
        let minute_changed = shown_minute != Some(wall.minute);

        if self
            .rotation
            .poll(wall.hour, &self.mode, &mut self.state.animation)
        {
            self.emit(ClockEvent::PaletteRotated(self.state.animation.rotation));
            if !minute_changed {
                self.renderer.refresh(&self.mode, &self.state.animation);
            }
        }

        if self
            .animation_clock
            .poll(now, &self.mode, &mut self.state.animation)
            && !minute_changed
        {
            self.renderer.refresh(&self.mode, &self.state.animation);
        }

        if minute_changed {
            return self.redraw(now, wall);
        }

        PollResult::idle(now)
    }

    /// Read-only state for diagnostics
    pub fn status(&self) -> ClockStatus {
        ClockStatus {
            mode: self.mode.id(),
            format: self.state.settings.format,
            rotation: self.state.animation.rotation,
            displayed: self.state.displayed,
        }
    }

    pub fn renderer(&self) -> &Renderer<O> {
        &self.renderer
    }

    pub fn time_source(&self) -> &T {
        &self.time
    }

    pub fn time_source_mut(&mut self) -> &mut T {
        &mut self.time
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply this pass's button actions
    ///
    /// Returns `true` when the shown pattern must be redrawn.
    fn process_input<B: Buttons>(
        &mut self,
        now: Instant,
        buttons: &mut B,
        wall: &mut WallTime,
    ) -> bool {
        let mut needs_redraw = false;
        for action in self.input.poll(now, buttons) {
            match action {
                InputAction::HourUp | InputAction::HourDown => {
                    *wall = wall.step_hour(action == InputAction::HourUp);
                    self.adjust_time(*wall);
                    needs_redraw = true;
                }
                InputAction::MinuteUp | InputAction::MinuteDown => {
                    *wall = wall.step_minute(action == InputAction::MinuteUp);
                    self.adjust_time(*wall);
                    needs_redraw = true;
                }
                InputAction::CycleMode => self.cycle_mode(now),
                InputAction::ToggleFormat => {
                    self.toggle_format();
                    needs_redraw = true;
                }
            }
        }
        needs_redraw
    }

    fn adjust_time(&mut self, wall: WallTime) {
        #[cfg(feature = "esp32-log")]
        println!(
            "[Clock.adjust_time] {:02}:{:02}:{:02}",
            wall.hour, wall.minute, wall.second
        );
        self.time.set(wall);
        self.emit(ClockEvent::TimeAdjusted(wall));
    }

    /// Switch to the next mode and recolor the current pattern
    fn cycle_mode(&mut self, now: Instant) {
        let mode = self.state.settings.mode.next();
        self.state.settings.mode = mode;
        self.state.settings.save_mode(&mut self.store);

        self.mode = mode.to_slot();
        self.state.animation.reset_motion();
        self.animation_clock.restart(now);
        #[cfg(feature = "esp32-log")]
        println!("[Clock.cycle_mode] mode {}", mode.as_str());

        self.emit(ClockEvent::ModeChanged(mode));
        self.renderer.refresh(&self.mode, &self.state.animation);
    }

    fn toggle_format(&mut self) {
        let format = self.state.settings.format.toggled();
        self.state.settings.format = format;
        self.state.settings.save_format(&mut self.store);
        #[cfg(feature = "esp32-log")]
        println!("[Clock.toggle_format] format {}", format.as_str());

        self.emit(ClockEvent::FormatChanged(format));
    }

    /// Start a transition to a fresh pattern for `wall`
    fn redraw(&mut self, now: Instant, wall: WallTime) -> PollResult {
        let hour = self.state.settings.format.display_hour(wall.hour);
        let mask = self.selector.select(hour, wall.minute);
        self.renderer.begin(mask, self.state.animation, now);
        self.state.displayed = Some((hour, wall.minute));

        self.emit(ClockEvent::Redrawn {
            hour,
            minute: wall.minute,
        });
        self.advance(now)
    }

    fn advance(&mut self, now: Instant) -> PollResult {
        match self.renderer.advance(now, &self.mode) {
            Some(deadline) => PollResult::until(deadline, now),
            None => PollResult::idle(now),
        }
    }

    fn emit(&self, event: ClockEvent) {
        let _ = self.events.try_send(event);
    }
}
