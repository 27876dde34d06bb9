use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use studio_domain::schedule::{iso_weekday, week_bounds};

use crate::error::BookingServiceError;

/// A persisted seat in one occurrence of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub class_id: Uuid,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// What the catalog tells us about a class template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSnapshot {
    pub id: Uuid,
    pub name: String,
    pub teacher: String,
    pub weekday: u8,
    pub start_time: NaiveTime,
    pub capacity: u32,
    pub active: bool,
}

/// What identity tells us about an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSnapshot {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_active: bool,
}

/// The caller on whose behalf a booking is read or cancelled.
#[derive(Debug, Clone, Copy)]
pub struct Requester {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl Requester {
    /// Owners and admins see a booking; everyone else gets "not found".
    pub fn can_see(&self, booking: &Booking) -> bool {
        self.is_admin || booking.user_id == self.user_id
    }
}

// ── Admission ────────────────────────────────────────────────────────────────

/// State of one `(class, date)` occurrence as seen inside the admission
/// transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub booked: u64,
    pub already_booked: bool,
}

/// Duplicate check first, then capacity.
pub fn check_admission(occupancy: Occupancy, capacity: u32) -> Result<(), BookingServiceError> {
    if occupancy.already_booked {
        return Err(BookingServiceError::AlreadyBooked);
    }
    if occupancy.booked >= u64::from(capacity) {
        return Err(BookingServiceError::ClassFull);
    }
    Ok(())
}

/// Checks on the requested date that need no store access.
pub fn check_occurrence(
    class: &ClassSnapshot,
    date: NaiveDate,
    today: NaiveDate,
    enforce_weekday: bool,
) -> Result<(), BookingServiceError> {
    if date < today {
        return Err(BookingServiceError::InvalidDate);
    }
    if enforce_weekday && iso_weekday(date) != class.weekday {
        return Err(BookingServiceError::WrongWeekday);
    }
    Ok(())
}

// ── Reads ────────────────────────────────────────────────────────────────────

/// Booking list filters; dates are inclusive.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub user_id: Option<Uuid>,
    /// `Some(ids)` restricts to those classes; `Some(vec![])` matches nothing.
    pub class_ids: Option<Vec<Uuid>>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl BookingFilter {
    pub fn validate(&self) -> Result<(), BookingServiceError> {
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) if from > to => Err(BookingServiceError::Validation(
                "date_from must not be after date_to".to_owned(),
            )),
            _ => Ok(()),
        }
    }
}

/// Date boundaries the statistics are computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsWindow {
    pub today: NaiveDate,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
}

impl StatisticsWindow {
    pub fn for_day(today: NaiveDate) -> Self {
        let (week_start, week_end) = week_bounds(today);
        Self {
            today,
            week_start,
            week_end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassCount {
    pub class_id: Uuid,
    pub bookings: u64,
}

/// Raw counts from the booking store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BookingCounts {
    pub total: u64,
    pub today: u64,
    pub this_week: u64,
    pub upcoming: u64,
    /// Most booked class; ties resolve to the lowest class id.
    pub top_class: Option<ClassCount>,
}

/// A booking joined with whatever could be resolved about its class and user.
#[derive(Debug, Clone)]
pub struct BookingView {
    pub booking: Booking,
    pub class: Option<ClassSnapshot>,
    pub user: Option<UserSnapshot>,
}
