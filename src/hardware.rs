//! Traits for the clock's external collaborators.
//!
//! Implement these for your board. None of the methods can fail: the device
//! has no recovery path for a misbehaving peripheral, so implementations
//! should handle bus errors internally (typically by returning the last good
//! value or doing nothing).

use crate::display::DisplayText;
use crate::types::{DateTime, Temperature};

/// The eight-character display transport.
pub trait CharDisplay {
    /// Shows `text` on the panel, leftmost character first.
    fn write_text(&mut self, text: &DisplayText);
}

/// A battery-backed real-time clock with a temperature sensor and a
/// square-wave output wired to an interrupt pin.
pub trait RealTimeClock {
    /// Probes the device. Queried once at startup.
    fn is_present(&mut self) -> bool;

    /// Current civil date and time.
    fn now(&mut self) -> DateTime;

    /// Sets the civil date and time.
    fn adjust(&mut self, date_time: &DateTime);

    /// The oscillator stopped since the time was last set.
    fn lost_power(&mut self) -> bool;

    /// Die temperature.
    fn temperature(&mut self) -> Temperature;

    /// Starts the periodic square-wave output that drives the tick interrupt.
    fn enable_periodic_tick(&mut self, frequency_hz: u16);
}

/// Byte-addressed persistent storage such as on-chip EEPROM.
///
/// EEPROM cells wear out with writes; callers only write on explicit user
/// confirmation.
pub trait SettingsStore {
    fn read_byte(&mut self, slot: u16) -> u8;

    fn write_byte(&mut self, slot: u16, value: u8);
}

/// PWM-dimmed display backlight.
pub trait Backlight {
    /// Sets the output duty, 0 (off) to 255 (fully on).
    fn set_level(&mut self, level: u8);
}
