//! Reservation API Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::reservation::{self, NewReservation};
use crate::utils::{validation, AppError, AppResult};
use shared::date;
use shared::models::{Reservation, ReservationCreate, ReservationStatus, ReservationUpdate, StatusUpdate};

/// 列表查询参数: 按日期或按手机号 (二选一，手机号优先)
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date: Option<String>,
    pub mobile_number: Option<String>,
}

/// GET /api/reservations?date=YYYY-MM-DD - 按日期列出预订 (按时间升序)
/// GET /api/reservations?mobile_number=... - 按手机号搜索 (任意状态)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    if let Some(mobile) = query.mobile_number {
        let found = reservation::search_by_mobile(&state.pool, &mobile).await?;
        return Ok(Json(found));
    }

    // 缺省日期 = 业务时区的今天
    let date = match query.date {
        Some(d) => {
            date::parse_date(&d).map_err(AppError::validation)?;
            d
        }
        None => date::format_date(date::today(state.config.timezone)),
    };

    let reservations = reservation::find_by_date(&state.pool, &date).await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/:id - 获取单个预订
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let found = reservation::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))?;
    Ok(Json(found))
}

/// POST /api/reservations - 创建预订 (初始状态总是 booked)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    validate_create(&payload, &state)?;

    let created = reservation::create(
        &state.pool,
        NewReservation {
            first_name: payload.first_name,
            last_name: payload.last_name,
            mobile_number: payload.mobile_number,
            reservation_date: payload.reservation_date,
            reservation_time: payload.reservation_time,
            people: payload.people,
        },
    )
    .await?;

    tracing::info!(
        reservation_id = created.id,
        date = %created.reservation_date,
        time = %created.reservation_time,
        "Reservation created"
    );

    Ok(Json(created))
}

/// PUT /api/reservations/:id - 编辑预订 (仅 booked 状态)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<Reservation>> {
    validate_update(&payload, &state)?;
    let updated = reservation::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// PUT /api/reservations/:id/status - 状态转换
///
/// 非法边返回 422；`seated` 必须走桌台入座接口。
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<Reservation>> {
    let updated = reservation::set_status(&state.pool, id, payload.status).await?;

    tracing::info!(
        reservation_id = id,
        status = %updated.status,
        "Reservation status changed"
    );

    Ok(Json(updated))
}

fn validate_create(payload: &ReservationCreate, state: &ServerState) -> AppResult<()> {
    validation::validate_required_text(&payload.first_name, "first_name", validation::MAX_NAME_LEN)?;
    validation::validate_required_text(&payload.last_name, "last_name", validation::MAX_NAME_LEN)?;
    validation::validate_mobile(&payload.mobile_number)?;
    validation::validate_people(payload.people)?;
    validation::validate_reservation_slot(
        &payload.reservation_date,
        &payload.reservation_time,
        state.config.timezone,
    )?;

    // A create payload may not pre-set a lifecycle position
    if let Some(status) = payload.status
        && status != ReservationStatus::Booked
    {
        return Err(AppError::validation(format!(
            "New reservations must be booked, not {status}"
        )));
    }
    Ok(())
}

fn validate_update(payload: &ReservationUpdate, state: &ServerState) -> AppResult<()> {
    if let Some(first_name) = &payload.first_name {
        validation::validate_required_text(first_name, "first_name", validation::MAX_NAME_LEN)?;
    }
    if let Some(last_name) = &payload.last_name {
        validation::validate_required_text(last_name, "last_name", validation::MAX_NAME_LEN)?;
    }
    if let Some(mobile) = &payload.mobile_number {
        validation::validate_mobile(mobile)?;
    }
    if let Some(people) = payload.people {
        validation::validate_people(people)?;
    }
    // Date and time are revalidated together; an edit may move either
    if payload.reservation_date.is_some() || payload.reservation_time.is_some() {
        let date = payload.reservation_date.as_deref().unwrap_or_default();
        let time = payload.reservation_time.as_deref().unwrap_or_default();
        if payload.reservation_date.is_none() || payload.reservation_time.is_none() {
            return Err(AppError::validation(
                "reservation_date and reservation_time must be edited together",
            ));
        }
        validation::validate_reservation_slot(date, time, state.config.timezone)?;
    }
    Ok(())
}
