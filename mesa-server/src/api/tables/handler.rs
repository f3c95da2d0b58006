//! Dining Table API Handlers
//!
//! Seat and finish are single atomic operations here — never paired client
//! calls — so the table and its reservation move together.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::ServerState;
use crate::db::repository::dining_table;
use crate::utils::{validation, AppResult};
use shared::models::{DiningTable, DiningTableCreate, SeatRequest};

/// GET /api/tables - 获取所有桌台 (含占用状态)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::find_all(&state.pool).await?;
    Ok(Json(tables))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    validation::validate_required_text(&payload.name, "name", validation::MAX_NAME_LEN)?;
    if payload.name.trim().len() < validation::MIN_TABLE_NAME_LEN {
        return Err(crate::utils::AppError::validation(format!(
            "Table name must be at least {} characters",
            validation::MIN_TABLE_NAME_LEN
        )));
    }
    validation::validate_capacity(payload.capacity)?;

    let table = dining_table::create(&state.pool, payload).await?;
    Ok(Json(table))
}

/// PUT /api/tables/:id/seat - 入座 (booked → seated, 占用桌台, 原子)
pub async fn seat(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SeatRequest>,
) -> AppResult<Json<DiningTable>> {
    let table = dining_table::seat(&state.pool, id, payload.reservation_id).await?;

    tracing::info!(
        table_id = id,
        reservation_id = payload.reservation_id,
        "Reservation seated"
    );

    Ok(Json(table))
}

/// DELETE /api/tables/:id/seat - 清台 (seated → finished, 释放桌台, 原子)
pub async fn finish(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    let table = dining_table::finish(&state.pool, id).await?;

    tracing::info!(table_id = id, "Table finished and cleared");

    Ok(Json(table))
}
