use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::repository::{BookingRepository, CatalogPort, IdentityPort};
use crate::domain::types::{Booking, BookingView, ClassSnapshot, Requester, check_occurrence};
use crate::error::BookingServiceError;
use crate::usecase::enrich::enrich_one;

/// Shared admission path: remote class read, local date checks, then the
/// store's atomic duplicate/capacity check and insert.
async fn admit<R: BookingRepository, C: CatalogPort>(
    repo: &R,
    catalog: &C,
    enforce_weekday: bool,
    user_id: Uuid,
    class_id: Uuid,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<(Booking, ClassSnapshot), BookingServiceError> {
    let class = catalog
        .get_class(class_id)
        .await?
        .filter(|c| c.active)
        .ok_or(BookingServiceError::ClassNotFound)?;
    check_occurrence(&class, date, today, enforce_weekday)?;

    let booking = Booking {
        id: Uuid::now_v7(),
        user_id,
        class_id,
        date,
        created_at: Utc::now(),
    };
    repo.admit(&booking, class.capacity).await?;
    tracing::info!(
        booking_id = %booking.id,
        user_id = %user_id,
        class_id = %class_id,
        date = %date,
        "booking admitted"
    );
    Ok((booking, class))
}

// ── CreateBooking ────────────────────────────────────────────────────────────

pub struct CreateBookingInput {
    pub class_id: Uuid,
    pub date: NaiveDate,
}

pub struct CreateBookingUseCase<R: BookingRepository, C: CatalogPort, I: IdentityPort> {
    pub repo: R,
    pub catalog: C,
    pub identity: I,
    pub enforce_weekday: bool,
}

impl<R: BookingRepository, C: CatalogPort, I: IdentityPort> CreateBookingUseCase<R, C, I> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CreateBookingInput,
        today: NaiveDate,
    ) -> Result<BookingView, BookingServiceError> {
        let (booking, class) = admit(
            &self.repo,
            &self.catalog,
            self.enforce_weekday,
            user_id,
            input.class_id,
            input.date,
            today,
        )
        .await?;
        Ok(enrich_one(&self.identity, booking, Some(class)).await)
    }
}

// ── AdminCreateBooking ───────────────────────────────────────────────────────

pub struct AdminCreateBookingInput {
    pub user_id: Uuid,
    pub class_id: Uuid,
    pub date: NaiveDate,
}

pub struct AdminCreateBookingUseCase<R: BookingRepository, C: CatalogPort, I: IdentityPort> {
    pub repo: R,
    pub catalog: C,
    pub identity: I,
    pub enforce_weekday: bool,
}

impl<R: BookingRepository, C: CatalogPort, I: IdentityPort> AdminCreateBookingUseCase<R, C, I> {
    pub async fn execute(
        &self,
        admin_id: Uuid,
        input: AdminCreateBookingInput,
        today: NaiveDate,
    ) -> Result<BookingView, BookingServiceError> {
        let user = self
            .identity
            .get_user(input.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(BookingServiceError::UserNotFound)?;
        let (booking, class) = admit(
            &self.repo,
            &self.catalog,
            self.enforce_weekday,
            user.id,
            input.class_id,
            input.date,
            today,
        )
        .await?;
        tracing::info!(admin_id = %admin_id, booking_id = %booking.id, "booking made on behalf of user");
        Ok(BookingView {
            booking,
            class: Some(class),
            user: Some(user),
        })
    }
}

// ── CancelBooking ────────────────────────────────────────────────────────────

pub struct CancelBookingUseCase<R: BookingRepository> {
    pub repo: R,
}

impl<R: BookingRepository> CancelBookingUseCase<R> {
    pub async fn execute(
        &self,
        requester: Requester,
        booking_id: Uuid,
    ) -> Result<(), BookingServiceError> {
        let booking = self
            .repo
            .find_by_id(booking_id)
            .await?
            .filter(|b| requester.can_see(b))
            .ok_or(BookingServiceError::BookingNotFound)?;
        // A concurrent cancel may have won.
        if !self.repo.delete(booking.id).await? {
            return Err(BookingServiceError::BookingNotFound);
        }
        tracing::info!(
            booking_id = %booking.id,
            cancelled_by = %requester.user_id,
            "booking cancelled"
        );
        Ok(())
    }
}
