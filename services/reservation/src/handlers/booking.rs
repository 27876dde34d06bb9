use axum::{Json, extract::State, http::StatusCode};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use studio_auth_types::identity::CurrentUser;
use studio_core::extract::{JsonBody, PathParam, QueryParams};
use studio_domain::pagination::{Page, PageRequest};

use crate::domain::types::Requester;
use crate::error::BookingServiceError;
use crate::handlers::BookingResponse;
use crate::state::AppState;
use crate::usecase::admission::{CancelBookingUseCase, CreateBookingInput, CreateBookingUseCase};
use crate::usecase::query::{DateRange, GetBookingUseCase, ListMyBookingsUseCase};

fn requester(user: &CurrentUser) -> Requester {
    Requester {
        user_id: user.user_id,
        is_admin: user.is_admin(),
    }
}

// ── POST /booking/book ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub class_id: Uuid,
    pub date: NaiveDate,
}

pub async fn create_booking(
    user: CurrentUser,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), BookingServiceError> {
    let usecase = CreateBookingUseCase {
        repo: state.booking_repo(),
        catalog: state.catalog.clone(),
        identity: state.identity.clone(),
        enforce_weekday: state.enforce_weekday,
    };
    let input = CreateBookingInput {
        class_id: body.class_id,
        date: body.date,
    };
    let view = usecase
        .execute(user.user_id, input, Utc::now().date_naive())
        .await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── GET /booking/bookings/{id} ───────────────────────────────────────────────

pub async fn get_booking(
    user: CurrentUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<BookingResponse>, BookingServiceError> {
    let usecase = GetBookingUseCase {
        repo: state.booking_repo(),
        catalog: state.catalog.clone(),
        identity: state.identity.clone(),
    };
    Ok(Json(usecase.execute(requester(&user), id).await?.into()))
}

// ── DELETE /booking/bookings/{id} ────────────────────────────────────────────

pub async fn cancel_booking(
    user: CurrentUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<StatusCode, BookingServiceError> {
    let usecase = CancelBookingUseCase {
        repo: state.booking_repo(),
    };
    usecase.execute(requester(&user), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /booking/my-bookings ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct MyBookingsQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub page: Option<u64>,
    pub size: Option<u64>,
}

pub async fn my_bookings(
    user: CurrentUser,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<MyBookingsQuery>,
) -> Result<Json<Page<BookingResponse>>, BookingServiceError> {
    let usecase = ListMyBookingsUseCase {
        repo: state.booking_repo(),
        catalog: state.catalog.clone(),
        identity: state.identity.clone(),
    };
    let range = DateRange {
        date_from: query.date_from,
        date_to: query.date_to,
    };
    let page = usecase
        .execute(user.user_id, range, PageRequest::new(query.page, query.size))
        .await?;
    Ok(Json(page.map(BookingResponse::from)))
}
