//! Color mode system with compile-time known mode variants
//!
//! All modes are stored in an enum to avoid heap allocations.
//! Each mode implements the `ColorMode` trait. Modes hold only their
//! configuration; the animation counters live in [`AnimationState`] so a
//! transition can freeze a copy of them.

mod breathing;
mod chase;
mod palette;
mod roles;

use embassy_time::Duration;

pub use breathing::{BreathingMode, breath_hue};
pub use chase::{ChaseMode, HUE_SPREAD, spread_hue};
pub use palette::{PALETTE, PaletteMode, palette_index};
pub use roles::{ROLES, RoleMode, role_index};

use crate::color::Rgb;

const MODE_NAME_FAST_CHASE: &str = "fast_chase";
const MODE_NAME_SLOW_CHASE: &str = "slow_chase";
const MODE_NAME_BREATHING: &str = "breathing";
const MODE_NAME_PALETTE: &str = "palette";
const MODE_NAME_ROLES: &str = "roles";

const MODE_ID_FAST_CHASE: u8 = 1;
const MODE_ID_SLOW_CHASE: u8 = 2;
const MODE_ID_BREATHING: u8 = 3;
const MODE_ID_PALETTE: u8 = 4;
const MODE_ID_ROLES: u8 = 5;

/// Number of selectable modes
pub const TOTAL_MODES: u8 = 5;

/// Animation counters shared by all modes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationState {
    /// Hue wheel position for the chase modes
    pub hue: u16,
    /// Sine phase for the breathing mode, in radians within one period
    pub phase: f32,
    /// Hourly rotation index (0-5) for the palette and role modes
    pub rotation: u8,
}

impl AnimationState {
    pub const fn new(rotation: u8) -> Self {
        Self {
            hue: 0,
            phase: 0.0,
            rotation,
        }
    }

    /// Reset continuous animation counters, keeping the rotation
    pub fn reset_motion(&mut self) {
        self.hue = 0;
        self.phase = 0.0;
    }
}

pub trait ColorMode {
    /// Sets if the mode output must pass through the display gamma curve
    const GAMMA_CORRECTED: bool = false;

    /// Sets if the mode follows the hourly rotation index
    const ROTATES_HOURLY: bool = false;

    /// Period of the animation tick, `None` for modes that never animate
    fn tick_interval(&self) -> Option<Duration> {
        None
    }

    /// Advance animation state by one tick
    fn tick(&self, _state: &mut AnimationState) {}

    /// Color of a lit element under the given animation state
    fn color_for(&self, index: usize, state: &AnimationState) -> Rgb;
}

/// Mode slot - enum containing all possible modes
#[derive(Debug, Clone)]
pub enum ModeSlot {
    /// Hue chase advancing every 50 ms
    FastChase(ChaseMode),
    /// Hue chase advancing every 234 ms
    SlowChase(ChaseMode),
    /// Hue swinging on a slow sine
    Breathing(BreathingMode),
    /// Four-color palette per digit group
    Palette(PaletteMode),
    /// White/blue/red roles for hours and minutes
    Roles(RoleMode),
}

/// Known mode ids, matching the persisted value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ModeId {
    #[default]
    FastChase = MODE_ID_FAST_CHASE,
    SlowChase = MODE_ID_SLOW_CHASE,
    Breathing = MODE_ID_BREATHING,
    Palette = MODE_ID_PALETTE,
    Roles = MODE_ID_ROLES,
}

impl Default for ModeSlot {
    fn default() -> Self {
        ModeId::default().to_slot()
    }
}

impl ModeId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_FAST_CHASE => Self::FastChase,
            MODE_ID_SLOW_CHASE => Self::SlowChase,
            MODE_ID_BREATHING => Self::Breathing,
            MODE_ID_PALETTE => Self::Palette,
            MODE_ID_ROLES => Self::Roles,
            _ => return None,
        })
    }

    /// Decode a stored id, falling back to the default mode when out of range
    pub fn from_stored(value: u8) -> Self {
        Self::from_raw(value).unwrap_or_default()
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Next mode in the cycle, wrapping from the last back to the first
    pub fn next(self) -> Self {
        Self::from_stored(self.raw() % TOTAL_MODES + 1)
    }

    pub fn to_slot(self) -> ModeSlot {
        match self {
            Self::FastChase => ModeSlot::FastChase(ChaseMode::fast()),
            Self::SlowChase => ModeSlot::SlowChase(ChaseMode::slow()),
            Self::Breathing => ModeSlot::Breathing(BreathingMode::new()),
            Self::Palette => ModeSlot::Palette(PaletteMode),
            Self::Roles => ModeSlot::Roles(RoleMode),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FastChase => MODE_NAME_FAST_CHASE,
            Self::SlowChase => MODE_NAME_SLOW_CHASE,
            Self::Breathing => MODE_NAME_BREATHING,
            Self::Palette => MODE_NAME_PALETTE,
            Self::Roles => MODE_NAME_ROLES,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_FAST_CHASE => Some(Self::FastChase),
            MODE_NAME_SLOW_CHASE => Some(Self::SlowChase),
            MODE_NAME_BREATHING => Some(Self::Breathing),
            MODE_NAME_PALETTE => Some(Self::Palette),
            MODE_NAME_ROLES => Some(Self::Roles),
            _ => None,
        }
    }
}

impl ModeSlot {
    /// Returns if the mode output needs gamma correction
    ///
    /// Derived from each mode's `ColorMode::GAMMA_CORRECTED` constant.
    pub fn requires_gamma(&self) -> bool {
        match self {
            Self::FastChase(_) | Self::SlowChase(_) => ChaseMode::GAMMA_CORRECTED,
            Self::Breathing(_) => BreathingMode::GAMMA_CORRECTED,
            Self::Palette(_) => PaletteMode::GAMMA_CORRECTED,
            Self::Roles(_) => RoleMode::GAMMA_CORRECTED,
        }
    }

    /// Returns if the mode is rotation-eligible
    pub fn rotates_hourly(&self) -> bool {
        match self {
            Self::FastChase(_) | Self::SlowChase(_) => ChaseMode::ROTATES_HOURLY,
            Self::Breathing(_) => BreathingMode::ROTATES_HOURLY,
            Self::Palette(_) => PaletteMode::ROTATES_HOURLY,
            Self::Roles(_) => RoleMode::ROTATES_HOURLY,
        }
    }

    pub fn tick_interval(&self) -> Option<Duration> {
        match self {
            Self::FastChase(mode) | Self::SlowChase(mode) => mode.tick_interval(),
            Self::Breathing(mode) => mode.tick_interval(),
            Self::Palette(mode) => mode.tick_interval(),
            Self::Roles(mode) => mode.tick_interval(),
        }
    }

    pub fn tick(&self, state: &mut AnimationState) {
        match self {
            Self::FastChase(mode) | Self::SlowChase(mode) => mode.tick(state),
            Self::Breathing(mode) => mode.tick(state),
            Self::Palette(mode) => mode.tick(state),
            Self::Roles(mode) => mode.tick(state),
        }
    }

    pub fn color_for(&self, index: usize, state: &AnimationState) -> Rgb {
        match self {
            Self::FastChase(mode) | Self::SlowChase(mode) => mode.color_for(index, state),
            Self::Breathing(mode) => mode.color_for(index, state),
            Self::Palette(mode) => mode.color_for(index, state),
            Self::Roles(mode) => mode.color_for(index, state),
        }
    }

    /// Get the mode ID for external observation
    pub fn id(&self) -> ModeId {
        match self {
            Self::FastChase(_) => ModeId::FastChase,
            Self::SlowChase(_) => ModeId::SlowChase,
            Self::Breathing(_) => ModeId::Breathing,
            Self::Palette(_) => ModeId::Palette,
            Self::Roles(_) => ModeId::Roles,
        }
    }
}
