use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use studio_domain::pagination::PageRequest;
use studio_reservation::domain::repository::{BookingRepository, CatalogPort, IdentityPort};
use studio_reservation::domain::types::{
    Booking, BookingCounts, BookingFilter, ClassCount, ClassSnapshot, Occupancy,
    StatisticsWindow, UserSnapshot, check_admission,
};
use studio_reservation::error::BookingServiceError;

// ── MockBookingRepo ──────────────────────────────────────────────────────────

/// In-memory store with the same admission contract as the database: the
/// check and the insert happen under one lock.
#[derive(Clone, Default)]
pub struct MockBookingRepo {
    pub bookings: Arc<tokio::sync::Mutex<Vec<Booking>>>,
}

impl MockBookingRepo {
    pub async fn count_for(&self, class_id: Uuid, date: NaiveDate) -> usize {
        self.bookings
            .lock()
            .await
            .iter()
            .filter(|b| b.class_id == class_id && b.date == date)
            .count()
    }

    pub async fn seed(&self, booking: Booking) {
        self.bookings.lock().await.push(booking);
    }
}

impl BookingRepository for MockBookingRepo {
    async fn admit(&self, booking: &Booking, capacity: u32) -> Result<(), BookingServiceError> {
        let mut bookings = self.bookings.lock().await;
        let same: Vec<&Booking> = bookings
            .iter()
            .filter(|b| b.class_id == booking.class_id && b.date == booking.date)
            .collect();
        let occupancy = Occupancy {
            booked: same.len() as u64,
            already_booked: same.iter().any(|b| b.user_id == booking.user_id),
        };
        check_admission(occupancy, capacity)?;
        // Let other admissions run while the lock is held.
        tokio::task::yield_now().await;
        bookings.push(booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, BookingServiceError> {
        Ok(self.bookings.lock().await.iter().find(|b| b.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, BookingServiceError> {
        let mut bookings = self.bookings.lock().await;
        let before = bookings.len();
        bookings.retain(|b| b.id != id);
        Ok(bookings.len() < before)
    }

    async fn list(
        &self,
        filter: &BookingFilter,
        page: PageRequest,
    ) -> Result<(Vec<Booking>, u64), BookingServiceError> {
        let mut matching: Vec<Booking> = self
            .bookings
            .lock()
            .await
            .iter()
            .filter(|b| filter.user_id.is_none_or(|u| b.user_id == u))
            .filter(|b| {
                filter
                    .class_ids
                    .as_ref()
                    .is_none_or(|ids| ids.contains(&b.class_id))
            })
            .filter(|b| filter.date_from.is_none_or(|d| b.date >= d))
            .filter(|b| filter.date_to.is_none_or(|d| b.date <= d))
            .cloned()
            .collect();
        matching.sort_by(|a, b| (a.date, a.created_at, a.id).cmp(&(b.date, b.created_at, b.id)));
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .collect();
        Ok((items, total))
    }

    async fn counts(&self, window: StatisticsWindow) -> Result<BookingCounts, BookingServiceError> {
        let bookings = self.bookings.lock().await;
        let mut per_class: Vec<ClassCount> = Vec::new();
        for b in bookings.iter() {
            match per_class.iter_mut().find(|c| c.class_id == b.class_id) {
                Some(c) => c.bookings += 1,
                None => per_class.push(ClassCount {
                    class_id: b.class_id,
                    bookings: 1,
                }),
            }
        }
        per_class.sort_by(|a, b| b.bookings.cmp(&a.bookings).then(a.class_id.cmp(&b.class_id)));
        Ok(BookingCounts {
            total: bookings.len() as u64,
            today: bookings.iter().filter(|b| b.date == window.today).count() as u64,
            this_week: bookings
                .iter()
                .filter(|b| (window.week_start..=window.week_end).contains(&b.date))
                .count() as u64,
            upcoming: bookings.iter().filter(|b| b.date >= window.today).count() as u64,
            top_class: per_class.first().copied(),
        })
    }
}

// ── MockCatalog ──────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCatalog {
    pub classes: Arc<Mutex<Vec<ClassSnapshot>>>,
    /// Every call fails as if the catalog were unreachable.
    pub down: bool,
}

impl MockCatalog {
    pub fn new(classes: Vec<ClassSnapshot>) -> Self {
        Self {
            classes: Arc::new(Mutex::new(classes)),
            down: false,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            down: true,
            ..Default::default()
        }
    }

    pub fn remove(&self, id: Uuid) {
        self.classes.lock().unwrap().retain(|c| c.id != id);
    }

    fn check_up(&self) -> Result<(), BookingServiceError> {
        if self.down {
            return Err(BookingServiceError::upstream(
                anyhow::anyhow!("connection refused"),
                "catalog",
            ));
        }
        Ok(())
    }
}

impl CatalogPort for MockCatalog {
    async fn get_class(&self, id: Uuid) -> Result<Option<ClassSnapshot>, BookingServiceError> {
        self.check_up()?;
        Ok(self.classes.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn lookup_classes(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<ClassSnapshot>, BookingServiceError> {
        self.check_up()?;
        Ok(self
            .classes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn find_class_ids(
        &self,
        teacher: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<Uuid>, BookingServiceError> {
        self.check_up()?;
        let contains = |haystack: &str, needle: Option<&str>| {
            needle.is_none_or(|n| haystack.to_lowercase().contains(&n.to_lowercase()))
        };
        Ok(self
            .classes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| contains(&c.teacher, teacher) && contains(&c.name, name))
            .map(|c| c.id)
            .collect())
    }
}

// ── MockIdentity ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockIdentity {
    pub users: Arc<Mutex<Vec<UserSnapshot>>>,
    pub down: bool,
}

impl MockIdentity {
    pub fn new(users: Vec<UserSnapshot>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            down: false,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            down: true,
            ..Default::default()
        }
    }
}

impl IdentityPort for MockIdentity {
    async fn get_user(&self, id: Uuid) -> Result<Option<UserSnapshot>, BookingServiceError> {
        if self.down {
            return Err(BookingServiceError::upstream(
                anyhow::anyhow!("connection refused"),
                "identity",
            ));
        }
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_class(name: &str, teacher: &str, weekday: u8, capacity: u32) -> ClassSnapshot {
    ClassSnapshot {
        id: Uuid::now_v7(),
        name: name.to_owned(),
        teacher: teacher.to_owned(),
        weekday,
        start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        capacity,
        active: true,
    }
}

pub fn test_user(name: &str) -> UserSnapshot {
    UserSnapshot {
        id: Uuid::now_v7(),
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
        is_active: true,
    }
}

pub fn test_booking(user_id: Uuid, class_id: Uuid, date: NaiveDate) -> Booking {
    Booking {
        id: Uuid::now_v7(),
        user_id,
        class_id,
        date,
        created_at: Utc::now(),
    }
}
