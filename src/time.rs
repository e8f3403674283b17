use crate::error::TimeSourceError;

/// Wall-clock time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl WallTime {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Move the hour by one, wrapping within the day. Seconds are kept.
    #[must_use]
    pub const fn step_hour(self, up: bool) -> Self {
        let hour = if up {
            (self.hour + 1) % 24
        } else {
            (self.hour + 23) % 24
        };
        Self { hour, ..self }
    }

    /// Move the minute by one, wrapping within the hour, and zero the seconds
    #[must_use]
    pub const fn step_minute(self, up: bool) -> Self {
        let minute = if up {
            (self.minute + 1) % 60
        } else {
            (self.minute + 59) % 60
        };
        Self {
            hour: self.hour,
            minute,
            second: 0,
        }
    }
}

/// Hour display convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    H12,
    #[default]
    H24,
}

impl TimeFormat {
    /// Decode the persisted flag; unknown values fall back to 24-hour
    pub const fn from_stored(value: u8) -> Self {
        match value {
            0 => Self::H12,
            _ => Self::H24,
        }
    }

    pub const fn to_stored(self) -> u8 {
        match self {
            Self::H12 => 0,
            Self::H24 => 1,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::H12 => Self::H24,
            Self::H24 => Self::H12,
        }
    }

    /// Hour as shown on the face
    pub const fn display_hour(self, hour: u8) -> u8 {
        match self {
            Self::H24 => hour,
            Self::H12 => match hour % 12 {
                0 => 12,
                h => h,
            },
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::H12 => "12h",
            Self::H24 => "24h",
        }
    }
}

/// Battery-backed real-time clock
///
/// Implement this trait for the RTC chip in use.
pub trait TimeSource {
    /// Check that the clock is present and running
    fn probe(&mut self) -> Result<(), TimeSourceError>;

    /// Read the current time
    fn now(&mut self) -> WallTime;

    /// Overwrite the current time
    fn set(&mut self, time: WallTime);
}
