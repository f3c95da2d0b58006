//! Dining Table Repository
//!
//! Seat and finish touch two entities (table occupancy + reservation
//! status). Both run as a single SQLite transaction: a crash between the two
//! UPDATEs can never leave an occupied table pointing at a booked
//! reservation, or a seated reservation with no table.

use super::{now_millis, RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate, Reservation, ReservationStatus};
use sqlx::{Sqlite, SqlitePool, Transaction};

const RES_COLUMNS: &str = "id, first_name, last_name, mobile_number, reservation_date, \
                           reservation_time, people, status, created_at, updated_at";

/// All tables with current occupancy state, ordered by name.
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(
        "SELECT id, name, capacity, reservation_id FROM dining_table ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(
        "SELECT id, name, capacity, reservation_id FROM dining_table WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

/// Create a dining table, optionally seeded with an occupying reservation.
pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    let mut tx = pool.begin().await?;

    let id: i64 =
        sqlx::query_scalar("INSERT INTO dining_table (name, capacity) VALUES (?, ?) RETURNING id")
            .bind(&data.name)
            .bind(data.capacity)
            .fetch_one(&mut *tx)
            .await?;

    if let Some(reservation_id) = data.reservation_id {
        seat_in_tx(&mut tx, id, data.capacity, reservation_id).await?;
    }

    tx.commit().await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dining table".into()))
}

/// Seat a booked reservation at a free table. Atomic.
pub async fn seat(pool: &SqlitePool, table_id: i64, reservation_id: i64) -> RepoResult<DiningTable> {
    let mut tx = pool.begin().await?;

    let table = find_in_tx(&mut tx, table_id).await?;
    if table.reservation_id.is_some() {
        return Err(RepoError::AlreadyOccupied(format!(
            "Table {} is occupied",
            table.name
        )));
    }

    seat_in_tx(&mut tx, table_id, table.capacity, reservation_id).await?;

    tx.commit().await?;
    find_by_id(pool, table_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {table_id} not found")))
}

/// Clear an occupied table and finish its reservation. Atomic.
pub async fn finish(pool: &SqlitePool, table_id: i64) -> RepoResult<DiningTable> {
    let mut tx = pool.begin().await?;

    let table = find_in_tx(&mut tx, table_id).await?;
    let reservation_id = table.reservation_id.ok_or_else(|| {
        RepoError::Validation(format!("Table {} is not occupied", table.name))
    })?;

    sqlx::query("UPDATE reservations SET status = ?, updated_at = ? WHERE id = ?")
        .bind(ReservationStatus::Finished)
        .bind(now_millis())
        .bind(reservation_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("UPDATE dining_table SET reservation_id = NULL WHERE id = ?")
        .bind(table_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    find_by_id(pool, table_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {table_id} not found")))
}

async fn find_in_tx(tx: &mut Transaction<'_, Sqlite>, table_id: i64) -> RepoResult<DiningTable> {
    sqlx::query_as::<_, DiningTable>(
        "SELECT id, name, capacity, reservation_id FROM dining_table WHERE id = ?",
    )
    .bind(table_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Table {table_id} not found")))
}

/// Inner seat step: validates the reservation and writes both sides.
async fn seat_in_tx(
    tx: &mut Transaction<'_, Sqlite>,
    table_id: i64,
    capacity: i32,
    reservation_id: i64,
) -> RepoResult<()> {
    let reservation = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {RES_COLUMNS} FROM reservations WHERE id = ?"
    ))
    .bind(reservation_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Reservation {reservation_id} not found")))?;

    if reservation.status != ReservationStatus::Booked {
        return Err(RepoError::InvalidTransition(format!(
            "Only booked reservations can be seated (current status: {})",
            reservation.status
        )));
    }
    if reservation.people > capacity {
        return Err(RepoError::Validation(format!(
            "Party of {} exceeds table capacity {}",
            reservation.people, capacity
        )));
    }

    sqlx::query("UPDATE reservations SET status = ?, updated_at = ? WHERE id = ?")
        .bind(ReservationStatus::Seated)
        .bind(now_millis())
        .bind(reservation_id)
        .execute(&mut **tx)
        .await?;
    sqlx::query("UPDATE dining_table SET reservation_id = ? WHERE id = ?")
        .bind(reservation_id)
        .bind(table_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}
