//! Shared test infrastructure for alpha-clock integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use alpha_clock::{
    AlphaClock, Backlight, CharDisplay, ClockConfig, ClockPeripherals, DateTime, DisplayText,
    PinLevel, RealTimeClock, SettingsStore, Temperature, TickSignal, TimeDuration, TimeInstant,
    TimeSource,
};
use embedded_hal::delay::DelayNs;
use std::cell::Cell;
use std::string::String;
use std::vec::Vec;

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Collaborators
// ============================================================================

/// Display that records everything written to it
pub struct MockDisplay {
    history: Vec<String>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
        }
    }

    pub fn last(&self) -> &str {
        self.history.last().map_or("", |s| s.as_str())
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl CharDisplay for MockDisplay {
    fn write_text(&mut self, text: &DisplayText) {
        assert_eq!(text.as_str().len(), 8, "display must always get 8 characters");
        self.history.push(String::from(text.as_str()));
    }
}

/// RTC whose time only changes when a test sets it
pub struct MockRtc {
    pub present: bool,
    pub lost_power: bool,
    pub now: DateTime,
    pub temperature: Temperature,
    pub adjustments: Vec<DateTime>,
    pub tick_hz: Option<u16>,
}

impl MockRtc {
    pub fn new(now: DateTime) -> Self {
        Self {
            present: true,
            lost_power: false,
            now,
            temperature: Temperature::from_tenths(215),
            adjustments: Vec::new(),
            tick_hz: None,
        }
    }

    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::new(date_time(2024, 3, 7, 10, 5, 3))
        }
    }
}

impl RealTimeClock for MockRtc {
    fn is_present(&mut self) -> bool {
        self.present
    }

    fn now(&mut self) -> DateTime {
        assert!(self.present, "absent RTC must never be read");
        self.now
    }

    fn adjust(&mut self, date_time: &DateTime) {
        assert!(self.present, "absent RTC must never be adjusted");
        self.now = *date_time;
        self.adjustments.push(*date_time);
    }

    fn lost_power(&mut self) -> bool {
        self.lost_power
    }

    fn temperature(&mut self) -> Temperature {
        self.temperature
    }

    fn enable_periodic_tick(&mut self, frequency_hz: u16) {
        self.tick_hz = Some(frequency_hz);
    }
}

/// EEPROM stand-in
pub struct MockStore {
    pub bytes: [u8; 4],
    pub writes: Vec<(u16, u8)>,
}

impl MockStore {
    pub fn with_brightness(value: u8) -> Self {
        Self {
            bytes: [value, 0xFF, 0xFF, 0xFF],
            writes: Vec::new(),
        }
    }
}

impl SettingsStore for MockStore {
    fn read_byte(&mut self, slot: u16) -> u8 {
        self.bytes[usize::from(slot)]
    }

    fn write_byte(&mut self, slot: u16, value: u8) {
        self.bytes[usize::from(slot)] = value;
        self.writes.push((slot, value));
    }
}

/// PWM stand-in
pub struct MockBacklight {
    pub levels: Vec<u8>,
}

impl MockBacklight {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    pub fn level(&self) -> Option<u8> {
        self.levels.last().copied()
    }
}

impl Backlight for MockBacklight {
    fn set_level(&mut self, level: u8) {
        self.levels.push(level);
    }
}

/// Blocking delay that advances the mock time instead of sleeping
pub struct MockDelay<'a> {
    time: &'a MockTimeSource,
    pub calls_ms: Vec<u32>,
}

impl<'a> MockDelay<'a> {
    pub fn new(time: &'a MockTimeSource) -> Self {
        Self {
            time,
            calls_ms: Vec::new(),
        }
    }

    pub fn total_ms(&self) -> u64 {
        self.calls_ms.iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.time.advance(u64::from(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls_ms.push(ms);
        self.time.advance(u64::from(ms));
    }
}

// ============================================================================
// Clock Harness
// ============================================================================

pub type TestClock<'a> = AlphaClock<
    'a,
    TestInstant,
    MockTimeSource,
    MockDisplay,
    MockRtc,
    MockStore,
    MockBacklight,
    MockDelay<'a>,
>;

pub const PRESSED: PinLevel = PinLevel::Low;
pub const RELEASED: PinLevel = PinLevel::High;

/// Loop iterations a level is held by `click_*` helpers; longer than the
/// 50 ms debounce window.
pub const CLICK_MS: u64 = 60;

pub fn date_time(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> DateTime {
    DateTime::new(year, month, day, hour, minute, second).unwrap()
}

pub fn new_clock<'a>(
    time: &'a MockTimeSource,
    tick: &'a TickSignal,
    rtc: MockRtc,
    store: MockStore,
) -> TestClock<'a> {
    let peripherals = ClockPeripherals {
        display: MockDisplay::new(),
        rtc,
        store,
        backlight: MockBacklight::new(),
        delay: MockDelay::new(time),
    };
    AlphaClock::new(peripherals, time, tick, ClockConfig::default())
}

/// A clock with an RTC reading 2024-03-07 (Thursday) 10:05:03 and 100% brightness.
pub fn default_clock<'a>(time: &'a MockTimeSource, tick: &'a TickSignal) -> TestClock<'a> {
    new_clock(
        time,
        tick,
        MockRtc::new(date_time(2024, 3, 7, 10, 5, 3)),
        MockStore::with_brightness(100),
    )
}

/// One loop iteration, 1 ms after the previous one.
pub fn step(clock: &mut TestClock<'_>, time: &MockTimeSource, menu: PinLevel, select: PinLevel) {
    time.advance(1);
    clock.service(menu, select);
}

/// Runs `iterations` loop iterations with constant button levels.
pub fn hold(
    clock: &mut TestClock<'_>,
    time: &MockTimeSource,
    menu: PinLevel,
    select: PinLevel,
    iterations: u64,
) {
    for _ in 0..iterations {
        step(clock, time, menu, select);
    }
}

/// Runs loop iterations with both buttons released.
pub fn idle(clock: &mut TestClock<'_>, time: &MockTimeSource, iterations: u64) {
    hold(clock, time, RELEASED, RELEASED, iterations);
}

/// Presses and releases button 1.
pub fn click_menu(clock: &mut TestClock<'_>, time: &MockTimeSource) {
    hold(clock, time, PRESSED, RELEASED, CLICK_MS);
    idle(clock, time, CLICK_MS);
}

/// Presses and releases button 2.
pub fn click_select(clock: &mut TestClock<'_>, time: &MockTimeSource) {
    hold(clock, time, RELEASED, PRESSED, CLICK_MS);
    idle(clock, time, CLICK_MS);
}
