//! Persisted user settings
//!
//! Two single-byte slots: the mode id and the time format flag. Values
//! are written as soon as they change.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::mode::ModeId;
use crate::time::TimeFormat;

/// Slot holding the mode id (1-5)
pub const MODE_SLOT: u8 = 0;
/// Slot holding the time format flag (0 = 12h, 1 = 24h)
pub const FORMAT_SLOT: u8 = 1;

/// Non-volatile byte storage (EEPROM, NVS, flash page)
pub trait SettingsStore {
    fn read_byte(&mut self, slot: u8) -> u8;
    fn write_byte(&mut self, slot: u8, value: u8);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub mode: ModeId,
    pub format: TimeFormat,
}

impl Settings {
    /// Read settings, clamping out-of-range values to their defaults
    pub fn load<S: SettingsStore>(store: &mut S) -> Self {
        let raw_mode = store.read_byte(MODE_SLOT);
        let mode = ModeId::from_stored(raw_mode);
        #[cfg(feature = "esp32-log")]
        if ModeId::from_raw(raw_mode).is_none() {
            println!("[Settings.load] stored mode {} out of range", raw_mode);
        }
        Self {
            mode,
            format: TimeFormat::from_stored(store.read_byte(FORMAT_SLOT)),
        }
    }

    pub fn save_mode<S: SettingsStore>(self, store: &mut S) {
        store.write_byte(MODE_SLOT, self.mode.raw());
    }

    pub fn save_format<S: SettingsStore>(self, store: &mut S) {
        store.write_byte(FORMAT_SLOT, self.format.to_stored());
    }
}
