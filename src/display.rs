//! Fixed-width display text and the pure per-mode formatter.
//!
//! The panel shows exactly eight characters. Every string handed to the
//! display transport is a [`DisplayText`], which truncates longer input and
//! pads shorter input with spaces.

use crate::calendar;
use crate::timing::BlinkPhase;
use crate::types::{Brightness, DateTime, OperationMode, Temperature};
use core::fmt::Write;
use heapless::String;

/// Number of character cells on the panel.
pub const DISPLAY_WIDTH: usize = 8;

/// Exactly [`DISPLAY_WIDTH`] printable ASCII characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText {
    text: String<DISPLAY_WIDTH>,
}

impl DisplayText {
    /// Eight spaces.
    pub fn blank() -> Self {
        let mut text = Self::empty();
        text.pad();
        text
    }

    /// Builds text from `s`, truncating after eight characters. Characters
    /// the panel cannot show are replaced with `?`.
    pub fn new(s: &str) -> Self {
        let mut text = Self::empty();
        text.push_str_truncating(s);
        text.pad();
        text
    }

    /// Builds text from format arguments with `snprintf`-style truncation.
    pub fn from_fmt(args: core::fmt::Arguments<'_>) -> Self {
        let mut text = Self::empty();
        // Writer never fails; overflow is truncated.
        let _ = text.write_fmt(args);
        text.pad();
        text
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Replaces the characters in `range` with spaces.
    pub fn blank_range(&mut self, range: core::ops::Range<usize>) {
        let mut masked = Self::empty();
        for (index, c) in self.text.chars().enumerate() {
            let c = if range.contains(&index) { ' ' } else { c };
            let _ = masked.text.push(c);
        }
        *self = masked;
    }

    /// Cuts the text after `len` characters and pads the rest with spaces.
    pub fn truncate(&mut self, len: usize) {
        self.text.truncate(len.min(DISPLAY_WIDTH));
        self.pad();
    }

    fn empty() -> Self {
        Self {
            text: String::new(),
        }
    }

    fn push_str_truncating(&mut self, s: &str) {
        for c in s.chars() {
            let c = if c.is_ascii() && !c.is_ascii_control() { c } else { '?' };
            if self.text.push(c).is_err() {
                break;
            }
        }
    }

    fn pad(&mut self) {
        while self.text.len() < DISPLAY_WIDTH {
            if self.text.push(' ').is_err() {
                break;
            }
        }
    }
}

impl Default for DisplayText {
    fn default() -> Self {
        Self::blank()
    }
}

impl Write for DisplayText {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.push_str_truncating(s);
        Ok(())
    }
}

impl core::fmt::Display for DisplayText {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DisplayText {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}

/// Working copy of the value being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditBuffer {
    /// Nothing under edit.
    #[default]
    Idle,
    Time(TimeEdit),
    Date(DateEdit),
    Brightness(Brightness),
}

/// Hour, minute and second under edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeEdit {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Seconds were changed locally and not yet written to the RTC.
    pub second_changed: bool,
}

impl TimeEdit {
    pub fn from_date_time(now: &DateTime) -> Self {
        Self {
            hour: now.hour,
            minute: now.minute,
            second: now.second,
            second_changed: false,
        }
    }
}

/// Year, month and day under edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateEdit {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl DateEdit {
    pub fn from_date_time(now: &DateTime) -> Self {
        Self {
            year: now.year,
            month: now.month,
            day: now.day,
        }
    }
}

/// Peripheral readings taken before rendering. `None` renders the
/// unknown-value placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub now: Option<DateTime>,
    pub temperature: Option<Temperature>,
}

/// Fixed caption of a menu entry, or `None` for other modes.
pub fn menu_caption(mode: OperationMode) -> Option<&'static str> {
    match mode {
        OperationMode::MenuDemo => Some("DEMO"),
        OperationMode::MenuSetTime => Some("SET TIME"),
        OperationMode::MenuSetDate => Some("SET DATE"),
        OperationMode::MenuSetBrightness => Some("LIGHT"),
        OperationMode::MenuExit => Some("EXIT"),
        _ => None,
    }
}

/// Renders the panel contents for `mode`.
///
/// Deterministic in its inputs: display modes read `snapshot`, edit modes
/// read `edit`, and `blink` blanks the field under edit when
/// [`BlinkPhase::Off`]. An edit mode whose buffer holds no matching value
/// renders blank.
pub fn render(
    mode: OperationMode,
    edit: &EditBuffer,
    snapshot: &Snapshot,
    blink: BlinkPhase,
) -> DisplayText {
    match mode {
        OperationMode::Time => render_time(snapshot.now.as_ref()),
        OperationMode::Date => render_date(snapshot.now.as_ref()),
        OperationMode::Year => render_year(snapshot.now.as_ref()),
        OperationMode::Temperature => render_temperature(snapshot.temperature),
        OperationMode::MenuDemo
        | OperationMode::MenuSetTime
        | OperationMode::MenuSetDate
        | OperationMode::MenuSetBrightness
        | OperationMode::MenuExit => DisplayText::new(menu_caption(mode).unwrap_or("")),
        OperationMode::SetHour | OperationMode::SetMinute | OperationMode::SetSecond => {
            match edit {
                EditBuffer::Time(time) => render_time_edit(mode, time, blink),
                _ => DisplayText::blank(),
            }
        }
        OperationMode::SetYear | OperationMode::SetMonth | OperationMode::SetDay => match edit {
            EditBuffer::Date(date) => render_date_edit(mode, date, blink),
            _ => DisplayText::blank(),
        },
        OperationMode::SetBrightness => match edit {
            EditBuffer::Brightness(brightness) => render_brightness_edit(*brightness, blink),
            _ => DisplayText::blank(),
        },
    }
}

fn render_time(now: Option<&DateTime>) -> DisplayText {
    match now {
        Some(now) => DisplayText::from_fmt(format_args!(
            "{:02}:{:02}:{:02}",
            now.hour, now.minute, now.second
        )),
        None => DisplayText::new("??:??:??"),
    }
}

fn render_date(now: Option<&DateTime>) -> DisplayText {
    match now {
        Some(now) => DisplayText::from_fmt(format_args!(
            "{} {:02}/{:02}",
            now.weekday.abbreviation(),
            now.day,
            now.month
        )),
        None => DisplayText::new("?? ??/??"),
    }
}

fn render_year(now: Option<&DateTime>) -> DisplayText {
    match now {
        Some(now) => DisplayText::from_fmt(format_args!("  {:04}", now.year)),
        None => DisplayText::new("  ????"),
    }
}

fn render_temperature(temperature: Option<Temperature>) -> DisplayText {
    match temperature {
        Some(temperature) => {
            let tenths = temperature.tenths();
            let sign = if tenths < 0 { "-" } else { "" };
            let magnitude = tenths.unsigned_abs();
            DisplayText::from_fmt(format_args!(
                "T: {}{}.{}",
                sign,
                magnitude / 10,
                magnitude % 10
            ))
        }
        None => DisplayText::new("T: ?.?"),
    }
}

fn render_time_edit(mode: OperationMode, time: &TimeEdit, blink: BlinkPhase) -> DisplayText {
    let mut text = DisplayText::from_fmt(format_args!(
        "{:02}:{:02}:{:02}",
        time.hour, time.minute, time.second
    ));
    if blink == BlinkPhase::Off {
        let start = match mode {
            OperationMode::SetMinute => 3,
            OperationMode::SetSecond => 6,
            _ => 0,
        };
        text.blank_range(start..start + 2);
    }
    text
}

fn render_date_edit(mode: OperationMode, date: &DateEdit, blink: BlinkPhase) -> DisplayText {
    let mut text = match mode {
        OperationMode::SetYear => DisplayText::from_fmt(format_args!("Y: {:04}", date.year)),
        OperationMode::SetMonth => DisplayText::from_fmt(format_args!("M: {:02}", date.month)),
        _ => DisplayText::from_fmt(format_args!(
            "D: {:02} {}",
            date.day,
            calendar::weekday(date.year, date.month, date.day).abbreviation()
        )),
    };
    if blink == BlinkPhase::Off {
        text.truncate(3);
    }
    text
}

fn render_brightness_edit(brightness: Brightness, blink: BlinkPhase) -> DisplayText {
    let mut text = DisplayText::from_fmt(format_args!("L: {:03}%", brightness.percent()));
    if blink == BlinkPhase::Off {
        text.truncate(3);
    }
    text
}

/// The successive eight-character windows of `text` scrolling in from the
/// right and out to the left.
///
/// The text is framed by a full panel of spaces on each side, so the first
/// window is blank and the last shows only the trailing padding.
pub struct ScrollWindows<'a> {
    text: &'a [u8],
    position: usize,
}

impl<'a> ScrollWindows<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text: text.as_bytes(),
            position: 0,
        }
    }

    fn window_count(&self) -> usize {
        self.text.len() + DISPLAY_WIDTH + 1
    }

    fn char_at(&self, framed_index: usize) -> char {
        framed_index
            .checked_sub(DISPLAY_WIDTH)
            .and_then(|index| self.text.get(index))
            .map_or(' ', |&b| char::from(b))
    }
}

impl Iterator for ScrollWindows<'_> {
    type Item = DisplayText;

    fn next(&mut self) -> Option<DisplayText> {
        if self.position >= self.window_count() {
            return None;
        }
        let mut window = DisplayText::empty();
        for offset in 0..DISPLAY_WIDTH {
            let _ = window.text.push(self.char_at(self.position + offset));
        }
        self.position += 1;
        Some(window)
    }
}
