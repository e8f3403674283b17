//! Outbound clock events
//!
//! The clock pushes events into a bounded [`Channel`] as its state changes;
//! a console or status task drains them. Events never flow back into the
//! clock, and a full queue drops the newest event.

use crate::channel::{Channel, Receiver, Sender};
use crate::mode::ModeId;
use crate::time::{TimeFormat, WallTime};

/// Something observable happened in the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// Mode changed and was persisted
    ModeChanged(ModeId),
    /// Time format toggled and was persisted
    FormatChanged(TimeFormat),
    /// Time was adjusted from the buttons
    TimeAdjusted(WallTime),
    /// Hourly rotation index moved
    PaletteRotated(u8),
    /// A new time pattern started fading in
    Redrawn { hour: u8, minute: u8 },
}

pub type EventChannel<const SIZE: usize> = Channel<ClockEvent, SIZE>;
pub type EventSender<'a, const SIZE: usize> = Sender<'a, ClockEvent, SIZE>;
pub type EventReceiver<'a, const SIZE: usize> = Receiver<'a, ClockEvent, SIZE>;
