use core::fmt;

/// The real-time clock did not respond
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSourceError;

/// Errors that stop the clock from starting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// No verified time source; the firmware must halt
    TimeSourceUnavailable,
}

impl From<TimeSourceError> for ClockError {
    fn from(_: TimeSourceError) -> Self {
        Self::TimeSourceUnavailable
    }
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeSourceUnavailable => f.write_str("time source unavailable"),
        }
    }
}

impl core::error::Error for ClockError {}
