#![no_std]
#![no_main]

use alpha_clock::{
    AlphaClock, Backlight, CharDisplay, ClockConfig, ClockPeripherals, DateTime, DisplayText,
    PinLevel, RealTimeClock, SettingsStore, Temperature, TickSignal, TimeDuration, TimeInstant,
    TimeSource,
};
use cortex_m_rt::entry;
use embedded_hal::delay::DelayNs;
use panic_halt as _;

// ============================================================================
// Minimal Time Types
// ============================================================================

/// Minimal 32-bit millisecond duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration32(u32);

impl TimeDuration for Duration32 {
    fn as_millis(&self) -> u64 {
        self.0 as u64
    }

    fn from_millis(millis: u64) -> Self {
        Duration32(millis as u32)
    }
}

/// Minimal 32-bit millisecond instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Instant32(u32);

impl TimeInstant for Instant32 {
    type Duration = Duration32;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        Duration32(self.0.wrapping_sub(earlier.0))
    }
}

pub struct MinimalTimeSource;

impl TimeSource<Instant32> for MinimalTimeSource {
    fn now(&self) -> Instant32 {
        Instant32(0)
    }
}

// ============================================================================
// Minimal Hardware
// ============================================================================

/// Zero-size collaborators for measuring library overhead
pub struct MinimalDisplay;

impl CharDisplay for MinimalDisplay {
    fn write_text(&mut self, text: &DisplayText) {
        core::hint::black_box(text.as_bytes());
    }
}

pub struct MinimalRtc;

impl RealTimeClock for MinimalRtc {
    fn is_present(&mut self) -> bool {
        core::hint::black_box(true)
    }

    fn now(&mut self) -> DateTime {
        alpha_clock::config::FALLBACK_DATE_TIME
    }

    fn adjust(&mut self, date_time: &DateTime) {
        core::hint::black_box(date_time);
    }

    fn lost_power(&mut self) -> bool {
        core::hint::black_box(false)
    }

    fn temperature(&mut self) -> Temperature {
        Temperature::from_quarter_degrees(core::hint::black_box(86))
    }

    fn enable_periodic_tick(&mut self, frequency_hz: u16) {
        core::hint::black_box(frequency_hz);
    }
}

pub struct MinimalStore;

impl SettingsStore for MinimalStore {
    fn read_byte(&mut self, _slot: u16) -> u8 {
        core::hint::black_box(0xFF)
    }

    fn write_byte(&mut self, slot: u16, value: u8) {
        core::hint::black_box((slot, value));
    }
}

pub struct MinimalBacklight;

impl Backlight for MinimalBacklight {
    fn set_level(&mut self, level: u8) {
        core::hint::black_box(level);
    }
}

pub struct MinimalDelay;

impl DelayNs for MinimalDelay {
    fn delay_ns(&mut self, ns: u32) {
        core::hint::black_box(ns);
    }
}

static TICK: TickSignal = TickSignal::new();

#[entry]
fn main() -> ! {
    let time_source = MinimalTimeSource;
    let peripherals = ClockPeripherals {
        display: MinimalDisplay,
        rtc: MinimalRtc,
        store: MinimalStore,
        backlight: MinimalBacklight,
        delay: MinimalDelay,
    };
    let mut clock = AlphaClock::new(peripherals, &time_source, &TICK, ClockConfig::default());

    // Opaque levels keep every handler reachable
    loop {
        let menu = PinLevel::from_is_low(core::hint::black_box(false));
        let select = PinLevel::from_is_low(core::hint::black_box(false));
        clock.service(menu, select);
        TICK.signal();
    }
}
