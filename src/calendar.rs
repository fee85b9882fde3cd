//! Month and weekday domains used for filtering.

use chrono::Weekday;

use crate::error::FilterError;

/// Months a selection may name: January (1) through June (6).
pub const MONTHS: [u32; 6] = [1, 2, 3, 4, 5, 6];

/// Weekdays in the order they are offered at the prompt.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name of month `n` (1-based). Returns `None` outside 1..=12.
pub fn month_name(n: u32) -> Option<&'static str> {
    n.checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
}

/// Parses a full month name within the January to June domain, ignoring case.
pub fn parse_month(s: &str) -> Result<u32, FilterError> {
    let wanted = s.trim();
    MONTHS
        .into_iter()
        .find(|&m| month_name(m).is_some_and(|name| name.eq_ignore_ascii_case(wanted)))
        .ok_or_else(|| FilterError::UnknownMonth(s.to_string()))
}

/// Canonical title-cased weekday name, e.g. "Monday".
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parses a full weekday name, ignoring case. Abbreviations are rejected.
pub fn parse_weekday(s: &str) -> Result<Weekday, FilterError> {
    let wanted = s.trim();
    WEEKDAYS
        .into_iter()
        .find(|&d| weekday_name(d).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| FilterError::UnknownWeekday(s.to_string()))
}
