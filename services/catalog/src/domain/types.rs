use chrono::{DateTime, NaiveTime, Utc};
use uuid::Uuid;

use studio_domain::schedule::{MAX_WEEKDAY, MIN_WEEKDAY, is_valid_weekday};

use crate::error::CatalogServiceError;

pub const NAME_MAX_CHARS: usize = 100;
pub const TEACHER_MAX_CHARS: usize = 100;
pub const COMMENT_MAX_CHARS: usize = 500;
pub const MIN_CAPACITY: u32 = 1;
pub const MAX_CAPACITY: u32 = 100;

/// A recurring weekly class slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTemplate {
    pub id: Uuid,
    pub name: String,
    pub teacher: String,
    pub weekday: u8,
    pub start_time: NaiveTime,
    pub capacity: u32,
    pub comment: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog list filters. `None` fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct ClassFilter {
    /// Case-insensitive substring.
    pub teacher: Option<String>,
    /// Case-insensitive substring.
    pub name: Option<String>,
    pub weekday: Option<u8>,
    pub active: Option<bool>,
}

impl ClassFilter {
    pub fn validate(&self) -> Result<(), CatalogServiceError> {
        match self.weekday {
            Some(w) if !is_valid_weekday(w) => Err(weekday_error()),
            _ => Ok(()),
        }
    }
}

/// Validated fields of a template to be created.
#[derive(Debug, Clone)]
pub struct NewClass {
    pub name: String,
    pub teacher: String,
    pub weekday: u8,
    pub start_time: NaiveTime,
    pub capacity: u32,
    pub comment: Option<String>,
    pub active: bool,
}

impl NewClass {
    /// Trim text fields, drop a blank comment and check every bound.
    pub fn normalized(self) -> Result<Self, CatalogServiceError> {
        let new = Self {
            name: self.name.trim().to_owned(),
            teacher: self.teacher.trim().to_owned(),
            comment: normalize_comment(self.comment),
            ..self
        };
        check_text("name", &new.name, NAME_MAX_CHARS)?;
        check_text("teacher", &new.teacher, TEACHER_MAX_CHARS)?;
        check_weekday(new.weekday)?;
        check_capacity(new.capacity)?;
        check_comment(new.comment.as_deref())?;
        Ok(new)
    }
}

/// Partial update. A blank `comment` clears the stored comment.
#[derive(Debug, Clone, Default)]
pub struct ClassPatch {
    pub name: Option<String>,
    pub teacher: Option<String>,
    pub weekday: Option<u8>,
    pub start_time: Option<NaiveTime>,
    pub capacity: Option<u32>,
    pub comment: Option<String>,
    pub active: Option<bool>,
}

impl ClassPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.teacher.is_none()
            && self.weekday.is_none()
            && self.start_time.is_none()
            && self.capacity.is_none()
            && self.comment.is_none()
            && self.active.is_none()
    }

    /// Apply the patch to `current`, returning the validated result.
    pub fn apply(self, current: &ClassTemplate) -> Result<ClassTemplate, CatalogServiceError> {
        let mut next = current.clone();
        if let Some(name) = self.name {
            next.name = name.trim().to_owned();
            check_text("name", &next.name, NAME_MAX_CHARS)?;
        }
        if let Some(teacher) = self.teacher {
            next.teacher = teacher.trim().to_owned();
            check_text("teacher", &next.teacher, TEACHER_MAX_CHARS)?;
        }
        if let Some(weekday) = self.weekday {
            check_weekday(weekday)?;
            next.weekday = weekday;
        }
        if let Some(start_time) = self.start_time {
            next.start_time = start_time;
        }
        if let Some(capacity) = self.capacity {
            check_capacity(capacity)?;
            next.capacity = capacity;
        }
        if self.comment.is_some() {
            next.comment = normalize_comment(self.comment);
            check_comment(next.comment.as_deref())?;
        }
        if let Some(active) = self.active {
            next.active = active;
        }
        Ok(next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayCount {
    pub weekday: u8,
    pub classes: u64,
}

/// Aggregate view of the catalog for admins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStatistics {
    pub total_classes: u64,
    pub active_classes: u64,
    pub inactive_classes: u64,
    pub distinct_teachers: u64,
    pub total_active_capacity: u64,
    /// One entry per weekday 1..=7, active classes only.
    pub by_weekday: Vec<WeekdayCount>,
}

impl CatalogStatistics {
    pub fn from_classes(classes: &[ClassTemplate]) -> Self {
        let active: Vec<&ClassTemplate> = classes.iter().filter(|c| c.active).collect();
        let mut teachers: Vec<String> = classes.iter().map(|c| c.teacher.to_lowercase()).collect();
        teachers.sort_unstable();
        teachers.dedup();

        let by_weekday = (MIN_WEEKDAY..=MAX_WEEKDAY)
            .map(|weekday| WeekdayCount {
                weekday,
                classes: active.iter().filter(|c| c.weekday == weekday).count() as u64,
            })
            .collect();

        Self {
            total_classes: classes.len() as u64,
            active_classes: active.len() as u64,
            inactive_classes: (classes.len() - active.len()) as u64,
            distinct_teachers: teachers.len() as u64,
            total_active_capacity: active.iter().map(|c| u64::from(c.capacity)).sum(),
            by_weekday,
        }
    }
}

// ── Validation helpers ───────────────────────────────────────────────────────

fn weekday_error() -> CatalogServiceError {
    CatalogServiceError::Validation(format!(
        "weekday must be between {MIN_WEEKDAY} and {MAX_WEEKDAY}"
    ))
}

fn check_weekday(weekday: u8) -> Result<(), CatalogServiceError> {
    if is_valid_weekday(weekday) {
        Ok(())
    } else {
        Err(weekday_error())
    }
}

fn check_capacity(capacity: u32) -> Result<(), CatalogServiceError> {
    if (MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) {
        return Ok(());
    }
    Err(CatalogServiceError::Validation(format!(
        "capacity must be {MIN_CAPACITY}-{MAX_CAPACITY}"
    )))
}

fn check_text(field: &str, value: &str, max: usize) -> Result<(), CatalogServiceError> {
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(CatalogServiceError::Validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(())
}

fn check_comment(comment: Option<&str>) -> Result<(), CatalogServiceError> {
    match comment {
        Some(c) if c.chars().count() > COMMENT_MAX_CHARS => Err(CatalogServiceError::Validation(
            format!("comment must be at most {COMMENT_MAX_CHARS} characters"),
        )),
        _ => Ok(()),
    }
}

fn normalize_comment(comment: Option<String>) -> Option<String> {
    comment
        .map(|c| c.trim().to_owned())
        .filter(|c| !c.is_empty())
}
