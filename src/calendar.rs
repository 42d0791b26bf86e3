//! Calendar arithmetic for the date editor.

use crate::types::Weekday;

/// Leap-year test in the device's precedence: divisible by 400 is leap,
/// otherwise divisible by 100 is not, otherwise divisible by 4 is.
pub fn is_leap_year(year: u16) -> bool {
    if year % 400 == 0 {
        true
    } else if year % 100 == 0 {
        false
    } else {
        year % 4 == 0
    }
}

/// Number of days in `month` (1..=12) of `year`. Returns 0 for an invalid month.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Day of the week for a Gregorian date (Sakamoto's method).
pub fn weekday(year: u16, month: u8, day: u8) -> Weekday {
    const OFFSETS: [u16; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];

    let month_index = usize::from(month.clamp(1, 12) - 1);
    let y = if month < 3 { year.saturating_sub(1) } else { year };
    let days = u32::from(y) + u32::from(y / 4) - u32::from(y / 100)
        + u32::from(y / 400)
        + u32::from(OFFSETS[month_index])
        + u32::from(day);

    // days % 7 is always a valid index
    Weekday::from_index((days % 7) as u8).unwrap_or(Weekday::Sunday)
}
