//! Timing constants and startup defaults.

use crate::types::{DateTime, Weekday};

/// Tunables of the clock controller.
///
/// Durations suffixed `_ms` are wall-clock milliseconds measured through the
/// [`TimeSource`](crate::TimeSource). Durations suffixed `_ticks` count main
/// loop iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    /// A raw level must hold longer than this before it is accepted.
    pub debounce_ms: u64,
    /// Hold time after which an edit button auto-repeats.
    pub repeat_after_ms: u64,
    /// Pause after each auto-repeated action.
    pub repeat_pace_ms: u32,
    /// How long the field under edit stays visible after a tick or an edit.
    pub blink_ticks: u16,
    /// Date, year and temperature views fall back to the time after this.
    pub display_timeout_ticks: u16,
    /// Menu entries fall back to the time after this.
    pub menu_timeout_ticks: u16,
    /// Period of the software tick used when no RTC is present.
    pub soft_tick_ms: u64,
    /// Frequency requested from the RTC square-wave output.
    pub rtc_tick_hz: u16,
    /// How long each startup message stays up.
    pub splash_ms: u32,
    /// How long the `NO RTC` notice stays up.
    pub notice_ms: u32,
    /// Storage slot holding the brightness.
    pub brightness_slot: u16,
    /// Lowest year offered by the date editor.
    pub first_edit_year: u16,
    /// Highest year offered by the date editor; the next step wraps to
    /// [`first_edit_year`](Self::first_edit_year).
    pub last_edit_year: u16,
    /// Time written to an RTC that reports power loss.
    pub fallback_date_time: DateTime,
}

/// 2021-01-01 00:00:00, the first year the date editor offers.
pub const FALLBACK_DATE_TIME: DateTime = DateTime {
    year: 2021,
    month: 1,
    day: 1,
    weekday: Weekday::Friday,
    hour: 0,
    minute: 0,
    second: 0,
};

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 50,
            repeat_after_ms: 2000,
            repeat_pace_ms: 100,
            blink_ticks: 500,
            display_timeout_ticks: 5000,
            menu_timeout_ticks: 10000,
            soft_tick_ms: 1000,
            rtc_tick_hz: 1,
            splash_ms: 1000,
            notice_ms: 1000,
            brightness_slot: 0,
            first_edit_year: 2021,
            last_edit_year: 2037,
            fallback_date_time: FALLBACK_DATE_TIME,
        }
    }
}
