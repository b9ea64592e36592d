//! Date display formatting.

use chrono::{Datelike, NaiveDate};

/// Formats a date as `d month yyyy` with French month names, the written
/// convention on Algerian platforms.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dz_locale::format_date;
///
/// let start = NaiveDate::from_ymd_opt(2026, 9, 5).expect("valid date");
/// assert_eq!(format_date(start), "5 septembre 2026");
/// ```
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_name(date.month()), date.year())
}

/// Month names as written in Algerian French copy.
///
/// `chrono` guarantees months in `1..=12`; the final arm absorbs the
/// unreachable remainder rather than panicking.
const fn month_name(month: u32) -> &'static str {
    match month {
        1 => "janvier",
        2 => "février",
        3 => "mars",
        4 => "avril",
        5 => "mai",
        6 => "juin",
        7 => "juillet",
        8 => "août",
        9 => "septembre",
        10 => "octobre",
        11 => "novembre",
        _ => "décembre",
    }
}
