use chrono::NaiveDate;
use uuid::Uuid;

use studio_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{BookingRepository, CatalogPort, IdentityPort};
use crate::domain::types::{BookingFilter, BookingView, Requester};
use crate::error::BookingServiceError;
use crate::usecase::enrich::enrich;

// ── GetBooking ───────────────────────────────────────────────────────────────

pub struct GetBookingUseCase<R: BookingRepository, C: CatalogPort, I: IdentityPort> {
    pub repo: R,
    pub catalog: C,
    pub identity: I,
}

impl<R: BookingRepository, C: CatalogPort, I: IdentityPort> GetBookingUseCase<R, C, I> {
    pub async fn execute(
        &self,
        requester: Requester,
        booking_id: Uuid,
    ) -> Result<BookingView, BookingServiceError> {
        let booking = self
            .repo
            .find_by_id(booking_id)
            .await?
            .filter(|b| requester.can_see(b))
            .ok_or(BookingServiceError::BookingNotFound)?;
        let mut views = enrich(&self.catalog, &self.identity, vec![booking]).await;
        views.pop().ok_or_else(|| anyhow::anyhow!("enrichment dropped a booking").into())
    }
}

// ── ListMyBookings ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

pub struct ListMyBookingsUseCase<R: BookingRepository, C: CatalogPort, I: IdentityPort> {
    pub repo: R,
    pub catalog: C,
    pub identity: I,
}

impl<R: BookingRepository, C: CatalogPort, I: IdentityPort> ListMyBookingsUseCase<R, C, I> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        range: DateRange,
        page: PageRequest,
    ) -> Result<Page<BookingView>, BookingServiceError> {
        let filter = BookingFilter {
            user_id: Some(user_id),
            class_ids: None,
            date_from: range.date_from,
            date_to: range.date_to,
        };
        list_enriched(&self.repo, &self.catalog, &self.identity, filter, page).await
    }
}

// ── ListAllBookings ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct AdminBookingQuery {
    pub user_id: Option<Uuid>,
    /// Partial, case-insensitive; resolved through the catalog.
    pub teacher: Option<String>,
    /// Partial, case-insensitive; resolved through the catalog.
    pub class_name: Option<String>,
    pub range: DateRange,
}

pub struct ListAllBookingsUseCase<R: BookingRepository, C: CatalogPort, I: IdentityPort> {
    pub repo: R,
    pub catalog: C,
    pub identity: I,
}

impl<R: BookingRepository, C: CatalogPort, I: IdentityPort> ListAllBookingsUseCase<R, C, I> {
    pub async fn execute(
        &self,
        query: AdminBookingQuery,
        page: PageRequest,
    ) -> Result<Page<BookingView>, BookingServiceError> {
        let teacher = non_blank(query.teacher.as_deref());
        let class_name = non_blank(query.class_name.as_deref());
        let class_ids = if teacher.is_some() || class_name.is_some() {
            let ids = self.catalog.find_class_ids(teacher, class_name).await?;
            if ids.is_empty() {
                return Ok(Page::empty(page.clamped()));
            }
            Some(ids)
        } else {
            None
        };
        let filter = BookingFilter {
            user_id: query.user_id,
            class_ids,
            date_from: query.range.date_from,
            date_to: query.range.date_to,
        };
        list_enriched(&self.repo, &self.catalog, &self.identity, filter, page).await
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

async fn list_enriched<R: BookingRepository, C: CatalogPort, I: IdentityPort>(
    repo: &R,
    catalog: &C,
    identity: &I,
    filter: BookingFilter,
    page: PageRequest,
) -> Result<Page<BookingView>, BookingServiceError> {
    filter.validate()?;
    let page = page.clamped();
    let (bookings, total) = repo.list(&filter, page).await?;
    let views = enrich(catalog, identity, bookings).await;
    Ok(Page::new(views, total, page))
}
