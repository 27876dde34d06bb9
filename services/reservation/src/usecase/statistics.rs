use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::repository::{BookingRepository, CatalogPort};
use crate::domain::types::StatisticsWindow;
use crate::error::BookingServiceError;

/// Shown when a counted class no longer exists or cannot be resolved.
pub const MISSING_CLASS_NAME: &str = "Class no longer available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MostBookedClass {
    pub class_id: Uuid,
    pub name: String,
    pub bookings: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingStatistics {
    pub total_bookings: u64,
    pub bookings_today: u64,
    pub bookings_this_week: u64,
    pub upcoming_bookings: u64,
    pub most_booked_class: Option<MostBookedClass>,
}

pub struct BookingStatisticsUseCase<R: BookingRepository, C: CatalogPort> {
    pub repo: R,
    pub catalog: C,
}

impl<R: BookingRepository, C: CatalogPort> BookingStatisticsUseCase<R, C> {
    pub async fn execute(&self, today: NaiveDate) -> Result<BookingStatistics, BookingServiceError> {
        let counts = self.repo.counts(StatisticsWindow::for_day(today)).await?;
        let most_booked_class = match counts.top_class {
            Some(top) => Some(MostBookedClass {
                class_id: top.class_id,
                name: self.class_name(top.class_id).await,
                bookings: top.bookings,
            }),
            None => None,
        };
        Ok(BookingStatistics {
            total_bookings: counts.total,
            bookings_today: counts.today,
            bookings_this_week: counts.this_week,
            upcoming_bookings: counts.upcoming,
            most_booked_class,
        })
    }

    async fn class_name(&self, class_id: Uuid) -> String {
        let name = match self.catalog.lookup_classes(&[class_id]).await {
            Ok(classes) => classes
                .into_iter()
                .find(|c| c.id == class_id)
                .map(|c| c.name),
            Err(e) => {
                tracing::warn!(error = ?e, class_id = %class_id, "top class lookup failed");
                None
            }
        };
        name.unwrap_or_else(|| MISSING_CLASS_NAME.to_owned())
    }
}
