//! Canonical weekday names and lookups.

use chrono::Weekday;

/// Weekdays in index order, Monday = 0 through Sunday = 6.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Lowercase canonical names, aligned with [`WEEKDAYS`].
pub const WEEKDAY_NAMES: [&str; 7] =
    ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"];

/// Index of a weekday, Monday = 0.
pub fn weekday_index(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}

/// Canonical lowercase name of a weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday_index(weekday)]
}

/// Look up a weekday by its full canonical name, ignoring case.
///
/// Abbreviations are not accepted: `"mon"` is not a weekday name here.
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    WEEKDAY_NAMES
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(name))
        .map(|idx| WEEKDAYS[idx])
}
