//! Calendar fixtures relative to the current UTC date.
//!
//! Booking rules compare against the server's clock, so fixed sample dates
//! age into the past; derive them from today instead.

use chrono::{Days, NaiveDate, Utc};

use studio_domain::schedule::next_occurrence;

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn yesterday() -> NaiveDate {
    today() - Days::new(1)
}

/// First date strictly after today falling on ISO `weekday` (1 = Monday).
pub fn next_weekday(weekday: u8) -> NaiveDate {
    next_occurrence(today() + Days::new(1), weekday).expect("weekday in 1..=7")
}

/// Same weekday as `date`, `weeks` weeks later.
pub fn weeks_after(date: NaiveDate, weeks: u64) -> NaiveDate {
    date + Days::new(7 * weeks)
}
