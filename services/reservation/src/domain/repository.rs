#![allow(async_fn_in_trait)]

use uuid::Uuid;

use studio_domain::pagination::PageRequest;

use crate::domain::types::{
    Booking, BookingCounts, BookingFilter, ClassSnapshot, StatisticsWindow, UserSnapshot,
};
use crate::error::BookingServiceError;

/// Repository for bookings.
pub trait BookingRepository: Send + Sync {
    /// Insert `booking` if its occurrence still has room.
    ///
    /// The duplicate check, the occupancy count
    /// ([`crate::domain::types::check_admission`]) and the insert are one
    /// atomic unit serialized per `(class_id, date)`. Rejects with
    /// `AlreadyBooked` or `ClassFull`.
    async fn admit(&self, booking: &Booking, capacity: u32) -> Result<(), BookingServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, BookingServiceError>;
    /// `false` if nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, BookingServiceError>;
    /// One page ordered by date, then creation time; plus the unpaged total.
    async fn list(
        &self,
        filter: &BookingFilter,
        page: PageRequest,
    ) -> Result<(Vec<Booking>, u64), BookingServiceError>;
    async fn counts(&self, window: StatisticsWindow) -> Result<BookingCounts, BookingServiceError>;
}

/// Port for reading class templates from the catalog service.
pub trait CatalogPort: Send + Sync {
    /// `None` when the catalog has no such template.
    async fn get_class(&self, id: Uuid) -> Result<Option<ClassSnapshot>, BookingServiceError>;
    /// Templates that still exist among `ids`.
    async fn lookup_classes(&self, ids: &[Uuid])
    -> Result<Vec<ClassSnapshot>, BookingServiceError>;
    /// Ids of templates matching partial teacher/name filters.
    async fn find_class_ids(
        &self,
        teacher: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<Uuid>, BookingServiceError>;
}

/// Port for reading accounts from the identity service.
pub trait IdentityPort: Send + Sync {
    async fn get_user(&self, id: Uuid) -> Result<Option<UserSnapshot>, BookingServiceError>;
}
