#![no_std]

pub mod animation;
pub mod bounds;
pub mod channel;
pub mod clock;
pub mod color;
pub mod error;
pub mod events;
pub mod input;
pub mod math8;
pub mod mode;
pub mod pattern;
pub mod renderer;
pub mod rotation;
pub mod settings;
pub mod time;
pub mod transition;

pub use animation::AnimationClock;
pub use bounds::{DIGIT_GROUPS, DigitGroup, LED_COUNT};
pub use channel::{Channel, Receiver, Sender, TryReceiveError, TrySendError};
pub use clock::{Clock, ClockConfig, ClockStatus, PollResult};
pub use error::{ClockError, TimeSourceError};
pub use events::{ClockEvent, EventChannel, EventReceiver, EventSender};
pub use input::{Button, Buttons, InputAction, InputController};
pub use mode::{AnimationState, ModeId, ModeSlot, TOTAL_MODES};
pub use pattern::{LitMask, PatternSelector};
pub use renderer::Renderer;
pub use rotation::HourRotationTracker;
pub use settings::{Settings, SettingsStore};
pub use time::{TimeFormat, TimeSource, WallTime};
pub use transition::{MaskTransition, TransitionTimings};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The clock is generic over this trait.
pub trait OutputDriver {
    /// Write a full frame to the LEDs and latch it
    fn write(&mut self, colors: &[Rgb]);

    /// Set global brightness (0-255), called once at start
    fn set_brightness(&mut self, _brightness: u8) {}

    /// Map a color through the display's gamma curve
    fn gamma(&self, color: Rgb) -> Rgb {
        smart_leds::gamma(core::iter::once(color))
            .next()
            .unwrap_or(color)
    }
}
