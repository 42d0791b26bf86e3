//! Core value types shared by the controller, formatter and collaborators.

use crate::calendar;

/// The single active operating mode of the clock.
///
/// Exactly one mode is active at any instant and it alone decides which
/// display and input handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationMode {
    /// Live `HH:MM:SS`. The resting mode every timeout returns to.
    #[default]
    Time,
    /// Weekday, day and month.
    Date,
    /// Four-digit year.
    Year,
    /// RTC die temperature.
    Temperature,
    /// Menu entry running the display demo.
    MenuDemo,
    /// Menu entry starting the time editor.
    MenuSetTime,
    /// Menu entry starting the date editor.
    MenuSetDate,
    /// Menu entry starting the brightness editor.
    MenuSetBrightness,
    /// Menu entry leaving the menu.
    MenuExit,
    SetHour,
    SetMinute,
    SetSecond,
    SetYear,
    SetMonth,
    SetDay,
    SetBrightness,
}

impl OperationMode {
    /// `SetHour`, `SetMinute` or `SetSecond`.
    pub fn is_time_edit(self) -> bool {
        matches!(self, Self::SetHour | Self::SetMinute | Self::SetSecond)
    }
}

/// Day of the week, numbered from Sunday = 0 like the DS3231 family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Converts a Sunday-based index (0..=6).
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Two-letter abbreviation shown on the display.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Weekday::Sunday => "SU",
            Weekday::Monday => "MO",
            Weekday::Tuesday => "TU",
            Weekday::Wednesday => "WE",
            Weekday::Thursday => "TH",
            Weekday::Friday => "FR",
            Weekday::Saturday => "SA",
        }
    }
}

/// A civil date and time as read from or written to the RTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    /// 1..=12
    pub month: u8,
    /// 1..=days in month
    pub day: u8,
    pub weekday: Weekday,
    /// 0..=23
    pub hour: u8,
    /// 0..=59
    pub minute: u8,
    /// 0..=59
    pub second: u8,
}

impl DateTime {
    /// Creates a validated date/time; the weekday is derived from the date.
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, ClockError> {
        if !(1..=12).contains(&month) || day == 0 || day > calendar::days_in_month(year, month) {
            return Err(ClockError::InvalidDate { year, month, day });
        }
        if hour > 23 || minute > 59 || second > 59 {
            return Err(ClockError::InvalidTime {
                hour,
                minute,
                second,
            });
        }

        Ok(Self {
            year,
            month,
            day,
            weekday: calendar::weekday(year, month, day),
            hour,
            minute,
            second,
        })
    }

    /// Same date, different time of day.
    pub fn with_time(self, hour: u8, minute: u8, second: u8) -> Result<Self, ClockError> {
        Self::new(self.year, self.month, self.day, hour, minute, second)
    }

    /// Same time of day, different date.
    pub fn with_date(self, year: u16, month: u8, day: u8) -> Result<Self, ClockError> {
        Self::new(year, month, day, self.hour, self.minute, self.second)
    }
}

/// Temperature in tenths of a degree Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature(i16);

impl Temperature {
    pub const fn from_tenths(tenths: i16) -> Self {
        Self(tenths)
    }

    /// Converts the DS3231's quarter-degree register resolution, rounding
    /// half away from zero to one decimal.
    pub const fn from_quarter_degrees(quarters: i16) -> Self {
        // tenths = quarters * 2.5
        let doubled = quarters as i32 * 5;
        let rounded = if doubled >= 0 { (doubled + 1) / 2 } else { (doubled - 1) / 2 };
        Self(rounded as i16)
    }

    pub const fn tenths(self) -> i16 {
        self.0
    }
}

/// Display backlight intensity in percent, always within
/// [`Brightness::MIN`]..=[`Brightness::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

impl Brightness {
    pub const MIN: Brightness = Brightness(10);
    pub const MAX: Brightness = Brightness(100);

    /// Increment applied by one edit step.
    pub const STEP: u8 = 5;

    /// Creates a brightness, rejecting values outside 10..=100.
    pub fn new(percent: u8) -> Result<Self, ClockError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&percent) {
            Ok(Self(percent))
        } else {
            Err(ClockError::BrightnessOutOfRange(percent))
        }
    }

    /// Creates a brightness, clamping to the nearest valid bound.
    pub fn clamped(percent: u8) -> Self {
        Self(percent.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Next edit value: one step up, wrapping from 100 back to 10.
    ///
    /// A value off the 5 % grid (possible from storage) stops at 100 before
    /// wrapping, so full brightness is never skipped.
    pub fn next(self) -> Self {
        if self.0 >= Self::MAX.0 {
            Self::MIN
        } else {
            Self((self.0 + Self::STEP).min(Self::MAX.0))
        }
    }

    /// PWM output value in the 0..=255 range.
    pub fn pwm_level(self) -> u8 {
        (u16::from(self.0) * 255 / 100) as u8
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::MAX
    }
}

/// Errors from validating constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Month out of 1..=12 or day beyond the month's length.
    InvalidDate { year: u16, month: u8, day: u8 },

    /// Hour, minute or second out of range.
    InvalidTime { hour: u8, minute: u8, second: u8 },

    /// Brightness outside 10..=100 percent.
    BrightnessOutOfRange(u8),
}

impl core::fmt::Display for ClockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ClockError::InvalidDate { year, month, day } => {
                write!(f, "invalid date {:04}-{:02}-{:02}", year, month, day)
            }
            ClockError::InvalidTime {
                hour,
                minute,
                second,
            } => {
                write!(f, "invalid time {:02}:{:02}:{:02}", hour, minute, second)
            }
            ClockError::BrightnessOutOfRange(percent) => {
                write!(f, "brightness {}% outside 10-100%", percent)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClockError {}
