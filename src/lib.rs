#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`AlphaClock`**: The mode state machine; call `service` once per main-loop iteration
//! - **`OperationMode`**: The sixteen display, menu and edit modes
//! - **`ButtonChannel`**: Debounce and auto-repeat for one active-low button
//! - **`ModeTimeout`** / **`BlinkTimer`**: Countdowns advanced once per loop iteration
//! - **`TickSignal`**: The only state shared with the RTC tick interrupt
//! - **`DisplayText`** / **`render`**: Eight-character panel text and the pure per-mode formatter
//! - **`CharDisplay`**, **`RealTimeClock`**, **`SettingsStore`**, **`Backlight`**: Traits to implement for your hardware
//! - **`TimeSource`**: Trait to implement for your millisecond timer
//!
//! Blocking waits (startup messages, the demo, auto-repeat pacing) go through
//! `embedded_hal::delay::DelayNs`.

#[macro_use]
mod fmt;

pub mod calendar;
pub mod config;
pub mod controller;
pub mod demo;
pub mod display;
pub mod hardware;
pub mod input;
pub mod settings;
pub mod time;
pub mod timing;
pub mod types;

pub use config::ClockConfig;
pub use controller::{AlphaClock, ClockPeripherals};
pub use display::{DateEdit, DisplayText, EditBuffer, ScrollWindows, Snapshot, TimeEdit, render};
pub use hardware::{Backlight, CharDisplay, RealTimeClock, SettingsStore};
pub use input::{ButtonChannel, PinLevel, Press};
pub use settings::BrightnessSetting;
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use timing::{BlinkPhase, BlinkTimer, ModeTimeout, SoftTick, TickSignal};
pub use types::{Brightness, ClockError, DateTime, OperationMode, Temperature, Weekday};
