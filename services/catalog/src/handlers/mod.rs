pub mod internal;
pub mod schedule;

use chrono::NaiveTime;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::ClassTemplate;

#[derive(Debug, Serialize)]
pub struct ClassResponse {
    pub id: Uuid,
    pub name: String,
    pub teacher: String,
    pub weekday: u8,
    pub start_time: NaiveTime,
    pub capacity: u32,
    pub comment: Option<String>,
    pub active: bool,
    #[serde(serialize_with = "studio_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "studio_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ClassTemplate> for ClassResponse {
    fn from(class: ClassTemplate) -> Self {
        Self {
            id: class.id,
            name: class.name,
            teacher: class.teacher,
            weekday: class.weekday,
            start_time: class.start_time,
            capacity: class.capacity,
            comment: class.comment,
            active: class.active,
            created_at: class.created_at,
            updated_at: class.updated_at,
        }
    }
}
