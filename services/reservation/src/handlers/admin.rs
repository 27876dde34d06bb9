use axum::{Json, extract::State, http::StatusCode};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use studio_auth_types::identity::AdminUser;
use studio_core::extract::{JsonBody, QueryParams};
use studio_domain::pagination::{Page, PageRequest};

use crate::error::BookingServiceError;
use crate::handlers::BookingResponse;
use crate::state::AppState;
use crate::usecase::admission::{AdminCreateBookingInput, AdminCreateBookingUseCase};
use crate::usecase::query::{AdminBookingQuery, DateRange, ListAllBookingsUseCase};
use crate::usecase::statistics::{BookingStatistics, BookingStatisticsUseCase, MostBookedClass};

// ── GET /booking/admin/bookings ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListBookingsQuery {
    pub user_id: Option<Uuid>,
    pub teacher: Option<String>,
    pub class_name: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub page: Option<u64>,
    pub size: Option<u64>,
}

pub async fn list_bookings(
    _admin: AdminUser,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListBookingsQuery>,
) -> Result<Json<Page<BookingResponse>>, BookingServiceError> {
    let usecase = ListAllBookingsUseCase {
        repo: state.booking_repo(),
        catalog: state.catalog.clone(),
        identity: state.identity.clone(),
    };
    let filter = AdminBookingQuery {
        user_id: query.user_id,
        teacher: query.teacher,
        class_name: query.class_name,
        range: DateRange {
            date_from: query.date_from,
            date_to: query.date_to,
        },
    };
    let page = usecase
        .execute(filter, PageRequest::new(query.page, query.size))
        .await?;
    Ok(Json(page.map(BookingResponse::from)))
}

// ── POST /booking/admin/bookings ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AdminCreateBookingRequest {
    pub user_id: Uuid,
    pub class_id: Uuid,
    pub date: NaiveDate,
}

pub async fn create_booking_for_user(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AdminCreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), BookingServiceError> {
    let usecase = AdminCreateBookingUseCase {
        repo: state.booking_repo(),
        catalog: state.catalog.clone(),
        identity: state.identity.clone(),
        enforce_weekday: state.enforce_weekday,
    };
    let input = AdminCreateBookingInput {
        user_id: body.user_id,
        class_id: body.class_id,
        date: body.date,
    };
    let view = usecase
        .execute(admin.user_id, input, Utc::now().date_naive())
        .await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── GET /booking/admin/statistics ────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MostBookedClassResponse {
    pub class_id: Uuid,
    pub name: String,
    pub bookings: u64,
}

#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub total_bookings: u64,
    pub bookings_today: u64,
    pub bookings_this_week: u64,
    pub upcoming_bookings: u64,
    pub most_booked_class: Option<MostBookedClassResponse>,
}

impl From<BookingStatistics> for StatisticsResponse {
    fn from(stats: BookingStatistics) -> Self {
        Self {
            total_bookings: stats.total_bookings,
            bookings_today: stats.bookings_today,
            bookings_this_week: stats.bookings_this_week,
            upcoming_bookings: stats.upcoming_bookings,
            most_booked_class: stats.most_booked_class.map(
                |MostBookedClass {
                     class_id,
                     name,
                     bookings,
                 }| MostBookedClassResponse {
                    class_id,
                    name,
                    bookings,
                },
            ),
        }
    }
}

pub async fn statistics(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<StatisticsResponse>, BookingServiceError> {
    let usecase = BookingStatisticsUseCase {
        repo: state.booking_repo(),
        catalog: state.catalog.clone(),
    };
    let stats = usecase.execute(Utc::now().date_naive()).await?;
    Ok(Json(stats.into()))
}
