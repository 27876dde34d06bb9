//! Calendar helpers for weekly class occurrences.
//!
//! Weekdays use ISO numbering: 1 = Monday .. 7 = Sunday.

use chrono::{Datelike, Days, NaiveDate};

pub const MIN_WEEKDAY: u8 = 1;
pub const MAX_WEEKDAY: u8 = 7;

pub fn is_valid_weekday(weekday: u8) -> bool {
    (MIN_WEEKDAY..=MAX_WEEKDAY).contains(&weekday)
}

/// ISO weekday number of `date`.
pub fn iso_weekday(date: NaiveDate) -> u8 {
    date.weekday().number_from_monday() as u8
}

/// Monday and Sunday of the ISO week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = u64::from(iso_weekday(date) - MIN_WEEKDAY);
    let monday = date - Days::new(back);
    (monday, monday + Days::new(6))
}

/// First date on or after `from` that falls on `weekday`.
///
/// Returns `None` for an out-of-range weekday.
pub fn next_occurrence(from: NaiveDate, weekday: u8) -> Option<NaiveDate> {
    if !is_valid_weekday(weekday) {
        return None;
    }
    let ahead = (7 + i16::from(weekday) - i16::from(iso_weekday(from))) % 7;
    Some(from + Days::new(ahead as u64))
}
