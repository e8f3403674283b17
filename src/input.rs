//! Button handling
//!
//! Five push buttons are polled every pass. Each one goes through its own
//! debouncer and fires once per press. Holding hour-up and hour-down
//! together, read raw, toggles the time format after a long hold.

use embassy_time::{Duration, Instant};
use heapless::Vec;

const DEFAULT_DEBOUNCE_MS: u64 = 50;
const DEFAULT_FORMAT_HOLD_MS: u64 = 10_000;

/// Default debounce window
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(DEFAULT_DEBOUNCE_MS);

/// Default hold time for the format toggle gesture
pub const DEFAULT_FORMAT_HOLD: Duration = Duration::from_millis(DEFAULT_FORMAT_HOLD_MS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Button {
    HourUp,
    HourDown,
    MinuteUp,
    MinuteDown,
    ModeCycle,
}

impl Button {
    pub const COUNT: usize = 5;

    pub const ALL: [Self; Self::COUNT] = [
        Self::HourUp,
        Self::HourDown,
        Self::MinuteUp,
        Self::MinuteDown,
        Self::ModeCycle,
    ];

    const fn index(self) -> usize {
        self as usize
    }

    /// Action fired by an accepted press
    pub const fn action(self) -> InputAction {
        match self {
            Self::HourUp => InputAction::HourUp,
            Self::HourDown => InputAction::HourDown,
            Self::MinuteUp => InputAction::MinuteUp,
            Self::MinuteDown => InputAction::MinuteDown,
            Self::ModeCycle => InputAction::CycleMode,
        }
    }
}

/// Raw button levels
///
/// Implement this trait for the board's GPIOs. `true` means pressed,
/// whatever the electrical polarity.
pub trait Buttons {
    fn is_pressed(&mut self, button: Button) -> bool;
}

/// Action requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    HourUp,
    HourDown,
    MinuteUp,
    MinuteDown,
    CycleMode,
    ToggleFormat,
}

/// Actions collected in one poll, in firing order
pub type InputActions = Vec<InputAction, { Button::COUNT + 1 }>;

/// Debounced edge detector for a single button
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    /// Last raw level seen
    level: bool,
    /// When the raw level last changed
    changed_at: Instant,
    /// Last level accepted as stable
    accepted: bool,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            level: false,
            changed_at: Instant::from_millis(0),
            accepted: false,
        }
    }

    /// Feed one raw sample
    ///
    /// Returns `true` once per press: when the pressed level has been
    /// steady for at least `window` and was not yet accepted.
    pub fn update(&mut self, level: bool, now: Instant, window: Duration) -> bool {
        if level != self.level {
            self.level = level;
            self.changed_at = now;
        }
        if level == self.accepted || now.saturating_duration_since(self.changed_at) < window {
            return false;
        }

        self.accepted = level;
        level
    }
}

/// Timer for a two-button long press
#[derive(Debug, Clone, Copy, Default)]
pub struct ComboHold {
    since: Option<Instant>,
    fired: bool,
}

impl ComboHold {
    pub const fn new() -> Self {
        Self {
            since: None,
            fired: false,
        }
    }

    /// Feed the combined raw state
    ///
    /// Returns `true` once per hold, when both buttons have stayed down for
    /// `hold`. Releasing either one cancels the timer.
    pub fn update(&mut self, held: bool, now: Instant, hold: Duration) -> bool {
        if !held {
            self.since = None;
            self.fired = false;
            return false;
        }

        let since = *self.since.get_or_insert(now);
        if self.fired || now.saturating_duration_since(since) < hold {
            return false;
        }
        self.fired = true;
        true
    }
}

/// Turns raw button levels into user actions
#[derive(Debug, Clone)]
pub struct InputController {
    debouncers: [Debouncer; Button::COUNT],
    combo: ComboHold,
    debounce: Duration,
    format_hold: Duration,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE, DEFAULT_FORMAT_HOLD)
    }
}

impl InputController {
    pub const fn new(debounce: Duration, format_hold: Duration) -> Self {
        Self {
            debouncers: [Debouncer::new(); Button::COUNT],
            combo: ComboHold::new(),
            debounce,
            format_hold,
        }
    }

    /// Sample every button once and collect the resulting actions
    ///
    /// The long-press check runs first. It does not suppress the single
    /// presses of the two hour buttons.
    pub fn poll<B: Buttons>(&mut self, now: Instant, buttons: &mut B) -> InputActions {
        let mut levels = [false; Button::COUNT];
        for button in Button::ALL {
            levels[button.index()] = buttons.is_pressed(button);
        }

        let mut actions = InputActions::new();
        let both_hours =
            levels[Button::HourUp.index()] && levels[Button::HourDown.index()];
        if self.combo.update(both_hours, now, self.format_hold) {
            let _ = actions.push(InputAction::ToggleFormat);
        }

        for button in Button::ALL {
            let index = button.index();
            if self.debouncers[index].update(levels[index], now, self.debounce) {
                let _ = actions.push(button.action());
            }
        }
        actions
    }
}
