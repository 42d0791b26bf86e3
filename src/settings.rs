//! Persistent brightness setting.
//!
//! The brightness is the only value kept across power cycles. It is read
//! once at startup and written back only when the user confirms a new value.

use crate::hardware::SettingsStore;
use crate::types::Brightness;

/// Brightness setting bound to its storage slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BrightnessSetting {
    slot: u16,
    value: Brightness,
}

impl BrightnessSetting {
    /// Reads the stored brightness.
    ///
    /// An out-of-range byte (for example erased EEPROM, `0xFF`) is clamped to
    /// the nearest bound and the corrected value is written back straight
    /// away.
    pub fn load<S: SettingsStore>(store: &mut S, slot: u16) -> Self {
        let raw = store.read_byte(slot);
        let value = Brightness::clamped(raw);
        if value.percent() != raw {
            warn!("stored brightness {} out of range, repaired to {}", raw, value.percent());
            store.write_byte(slot, value.percent());
        }
        Self { slot, value }
    }

    pub fn value(&self) -> Brightness {
        self.value
    }

    /// Persists `value`. Skips the write when it is already stored.
    pub fn save<S: SettingsStore>(&mut self, store: &mut S, value: Brightness) {
        if value == self.value {
            return;
        }
        store.write_byte(self.slot, value.percent());
        self.value = value;
        info!("brightness saved: {}%", value.percent());
    }
}
