pub mod admin;
pub mod booking;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::{BookingView, ClassSnapshot, UserSnapshot};
use crate::usecase::statistics::MISSING_CLASS_NAME;

const UNKNOWN_USER_NAME: &str = "Unknown user";

/// Class details shown with a booking; a placeholder once the template is
/// gone or the catalog cannot be reached.
#[derive(Debug, Serialize)]
pub struct ClassSummary {
    pub name: String,
    pub teacher: Option<String>,
    pub weekday: Option<u8>,
    pub start_time: Option<NaiveTime>,
    pub available: bool,
}

impl From<Option<ClassSnapshot>> for ClassSummary {
    fn from(class: Option<ClassSnapshot>) -> Self {
        match class {
            Some(c) => Self {
                name: c.name,
                teacher: Some(c.teacher),
                weekday: Some(c.weekday),
                start_time: Some(c.start_time),
                available: c.active,
            },
            None => Self {
                name: MISSING_CLASS_NAME.to_owned(),
                teacher: None,
                weekday: None,
                start_time: None,
                available: false,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub name: String,
    pub email: Option<String>,
}

impl From<Option<UserSnapshot>> for UserSummary {
    fn from(user: Option<UserSnapshot>) -> Self {
        match user {
            Some(u) => Self {
                name: u.name,
                email: Some(u.email),
            },
            None => Self {
                name: UNKNOWN_USER_NAME.to_owned(),
                email: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub class_id: Uuid,
    pub date: NaiveDate,
    #[serde(serialize_with = "studio_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    pub class: ClassSummary,
    pub user: UserSummary,
}

impl From<BookingView> for BookingResponse {
    fn from(view: BookingView) -> Self {
        let booking = view.booking;
        Self {
            id: booking.id,
            user_id: booking.user_id,
            class_id: booking.class_id,
            date: booking.date,
            created_at: booking.created_at,
            class: view.class.into(),
            user: view.user.into(),
        }
    }
}
