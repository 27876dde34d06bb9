use axum::{Json, extract::State, http::StatusCode};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use studio_auth_types::identity::AdminUser;
use studio_core::extract::{JsonBody, PathParam, QueryParams};
use studio_domain::pagination::{Page, PageRequest};

use crate::domain::types::{CatalogStatistics, ClassFilter, ClassPatch, NewClass};
use crate::error::CatalogServiceError;
use crate::handlers::ClassResponse;
use crate::state::AppState;
use crate::usecase::class::{
    CatalogStatisticsUseCase, CreateClassUseCase, DeleteClassUseCase, GetClassUseCase,
    ListClassesUseCase, UpdateClassUseCase,
};

// ── GET /schedule/schedule ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListClassesQuery {
    pub teacher: Option<String>,
    pub name: Option<String>,
    pub weekday: Option<u8>,
    /// Defaults to active classes only.
    pub active: Option<bool>,
    pub page: Option<u64>,
    pub size: Option<u64>,
}

pub async fn list_classes(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListClassesQuery>,
) -> Result<Json<Page<ClassResponse>>, CatalogServiceError> {
    let usecase = ListClassesUseCase {
        repo: state.class_repo(),
    };
    let filter = ClassFilter {
        teacher: query.teacher,
        name: query.name,
        weekday: query.weekday,
        active: Some(query.active.unwrap_or(true)),
    };
    let page = usecase
        .execute(filter, PageRequest::new(query.page, query.size))
        .await?;
    Ok(Json(page.map(ClassResponse::from)))
}

// ── GET /schedule/schedule/{id} ──────────────────────────────────────────────

pub async fn get_class(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ClassResponse>, CatalogServiceError> {
    let usecase = GetClassUseCase {
        repo: state.class_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /schedule/schedule ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub teacher: String,
    pub weekday: u8,
    pub start_time: NaiveTime,
    pub capacity: u32,
    pub comment: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

pub async fn create_class(
    _admin: AdminUser,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateClassRequest>,
) -> Result<(StatusCode, Json<ClassResponse>), CatalogServiceError> {
    let usecase = CreateClassUseCase {
        repo: state.class_repo(),
    };
    let class = usecase
        .execute(NewClass {
            name: body.name,
            teacher: body.teacher,
            weekday: body.weekday,
            start_time: body.start_time,
            capacity: body.capacity,
            comment: body.comment,
            active: body.active,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(class.into())))
}

// ── PUT /schedule/schedule/{id} ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub teacher: Option<String>,
    pub weekday: Option<u8>,
    pub start_time: Option<NaiveTime>,
    pub capacity: Option<u32>,
    pub comment: Option<String>,
    pub active: Option<bool>,
}

pub async fn update_class(
    _admin: AdminUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(body): JsonBody<UpdateClassRequest>,
) -> Result<Json<ClassResponse>, CatalogServiceError> {
    let usecase = UpdateClassUseCase {
        repo: state.class_repo(),
    };
    let patch = ClassPatch {
        name: body.name,
        teacher: body.teacher,
        weekday: body.weekday,
        start_time: body.start_time,
        capacity: body.capacity,
        comment: body.comment,
        active: body.active,
    };
    Ok(Json(usecase.execute(id, patch).await?.into()))
}

// ── DELETE /schedule/schedule/{id} ───────────────────────────────────────────

pub async fn delete_class(
    _admin: AdminUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<StatusCode, CatalogServiceError> {
    let usecase = DeleteClassUseCase {
        repo: state.class_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /schedule/schedule/statistics ────────────────────────────────────────

#[derive(Serialize)]
pub struct WeekdayCountResponse {
    pub weekday: u8,
    pub classes: u64,
}

#[derive(Serialize)]
pub struct StatisticsResponse {
    pub total_classes: u64,
    pub active_classes: u64,
    pub inactive_classes: u64,
    pub distinct_teachers: u64,
    pub total_active_capacity: u64,
    pub by_weekday: Vec<WeekdayCountResponse>,
}

impl From<CatalogStatistics> for StatisticsResponse {
    fn from(stats: CatalogStatistics) -> Self {
        Self {
            total_classes: stats.total_classes,
            active_classes: stats.active_classes,
            inactive_classes: stats.inactive_classes,
            distinct_teachers: stats.distinct_teachers,
            total_active_capacity: stats.total_active_capacity,
            by_weekday: stats
                .by_weekday
                .into_iter()
                .map(|w| WeekdayCountResponse {
                    weekday: w.weekday,
                    classes: w.classes,
                })
                .collect(),
        }
    }
}

pub async fn statistics(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<StatisticsResponse>, CatalogServiceError> {
    let usecase = CatalogStatisticsUseCase {
        repo: state.class_repo(),
    };
    Ok(Json(usecase.execute().await?.into()))
}
