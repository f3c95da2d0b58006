//! Reservation Repository

use super::{now_millis, RepoError, RepoResult};
use shared::models::{Reservation, ReservationStatus, ReservationUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, first_name, last_name, mobile_number, reservation_date, \
                       reservation_time, people, status, created_at, updated_at";

/// Validated create payload — handlers run business-rule validation first.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: String,
    pub reservation_time: String,
    pub people: i32,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let reservation = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservations WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(reservation)
}

/// All reservations for a calendar date, ordered by time ascending.
///
/// `finished` and `cancelled` are excluded — the actionable dashboard
/// contract. Rows stay queryable by id regardless of status.
pub async fn find_by_date(pool: &SqlitePool, date: &str) -> RepoResult<Vec<Reservation>> {
    let reservations = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservations \
         WHERE reservation_date = ? AND status NOT IN ('finished', 'cancelled') \
         ORDER BY reservation_time ASC"
    ))
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(reservations)
}

/// Search by partial mobile number, any status, ordered by date then time.
///
/// Both sides are compared digits-only so "555 0100" matches "(555) 0100".
pub async fn search_by_mobile(pool: &SqlitePool, mobile: &str) -> RepoResult<Vec<Reservation>> {
    let digits: String = mobile.chars().filter(|c| c.is_ascii_digit()).collect();
    let reservations = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservations \
         WHERE REPLACE(REPLACE(REPLACE(REPLACE(mobile_number, '(', ''), ')', ''), '-', ''), ' ', '') \
               LIKE '%' || ? || '%' \
         ORDER BY reservation_date ASC, reservation_time ASC"
    ))
    .bind(digits)
    .fetch_all(pool)
    .await?;
    Ok(reservations)
}

/// Insert a new reservation; always starts `booked`.
pub async fn create(pool: &SqlitePool, data: NewReservation) -> RepoResult<Reservation> {
    let now = now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO reservations \
         (first_name, last_name, mobile_number, reservation_date, reservation_time, people, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, 'booked', ?, ?) RETURNING id",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.mobile_number)
    .bind(&data.reservation_date)
    .bind(&data.reservation_time)
    .bind(data.people)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

/// Edit reservation fields. Only `booked` reservations may be edited.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: ReservationUpdate,
) -> RepoResult<Reservation> {
    let current = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))?;
    if current.status != ReservationStatus::Booked {
        return Err(RepoError::InvalidTransition(format!(
            "Only booked reservations can be edited (current status: {})",
            current.status
        )));
    }

    sqlx::query(
        "UPDATE reservations SET \
         first_name = COALESCE(?1, first_name), \
         last_name = COALESCE(?2, last_name), \
         mobile_number = COALESCE(?3, mobile_number), \
         reservation_date = COALESCE(?4, reservation_date), \
         reservation_time = COALESCE(?5, reservation_time), \
         people = COALESCE(?6, people), \
         updated_at = ?7 \
         WHERE id = ?8",
    )
    .bind(data.first_name)
    .bind(data.last_name)
    .bind(data.mobile_number)
    .bind(data.reservation_date)
    .bind(data.reservation_time)
    .bind(data.people)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
}

/// Apply a status transition via the status API.
///
/// `seated` is rejected here even though the edge is legal: seating must go
/// through the seat operation so table occupancy updates in the same
/// transaction.
pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    new_status: ReservationStatus,
) -> RepoResult<Reservation> {
    let current = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))?;

    if new_status == ReservationStatus::Seated {
        return Err(RepoError::InvalidTransition(
            "Reservations are seated through the table seat operation".into(),
        ));
    }
    if !current.status.can_transition_to(new_status) {
        return Err(RepoError::InvalidTransition(format!(
            "Cannot change status from {} to {}",
            current.status, new_status
        )));
    }

    sqlx::query("UPDATE reservations SET status = ?, updated_at = ? WHERE id = ?")
        .bind(new_status)
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        DbService::migrate(&pool).await.unwrap();
        pool
    }

    fn ada(date: &str, time: &str) -> NewReservation {
        NewReservation {
            first_name: "Ada".into(),
            last_name: "L".into(),
            mobile_number: "555-0100".into(),
            reservation_date: date.into(),
            reservation_time: time.into(),
            people: 2,
        }
    }

    #[tokio::test]
    async fn create_always_yields_booked() {
        let pool = test_pool().await;
        let r = create(&pool, ada("2024-12-10", "18:00")).await.unwrap();
        assert_eq!(r.status, ReservationStatus::Booked);
        assert_eq!(r.people, 2);
    }

    #[tokio::test]
    async fn list_by_date_sorted_by_time_ascending() {
        let pool = test_pool().await;
        create(&pool, ada("2024-12-10", "20:30")).await.unwrap();
        create(&pool, ada("2024-12-10", "18:00")).await.unwrap();
        create(&pool, ada("2024-12-11", "12:00")).await.unwrap();

        let listed = find_by_date(&pool, "2024-12-10").await.unwrap();
        let times: Vec<&str> = listed.iter().map(|r| r.reservation_time.as_str()).collect();
        assert_eq!(times, ["18:00", "20:30"]);

        // Zero matches is an empty sequence, not an error
        assert!(find_by_date(&pool, "2024-12-12").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_excludes_finished_and_cancelled() {
        let pool = test_pool().await;
        let r = create(&pool, ada("2024-12-10", "18:00")).await.unwrap();
        set_status(&pool, r.id, ReservationStatus::Cancelled)
            .await
            .unwrap();
        assert!(find_by_date(&pool, "2024-12-10").await.unwrap().is_empty());

        // Still queryable by id
        let by_id = find_by_id(&pool, r.id).await.unwrap().unwrap();
        assert_eq!(by_id.status, ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn status_api_rejects_seated_and_illegal_edges() {
        let pool = test_pool().await;
        let r = create(&pool, ada("2024-12-10", "18:00")).await.unwrap();

        // Direct seating bypasses table occupancy
        let err = set_status(&pool, r.id, ReservationStatus::Seated)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidTransition(_)));

        // booked -> finished skips seated
        let err = set_status(&pool, r.id, ReservationStatus::Finished)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidTransition(_)));

        // booked -> cancelled is fine; cancelled is terminal
        set_status(&pool, r.id, ReservationStatus::Cancelled)
            .await
            .unwrap();
        let err = set_status(&pool, r.id, ReservationStatus::Booked)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn edit_only_while_booked() {
        let pool = test_pool().await;
        let r = create(&pool, ada("2024-12-10", "18:00")).await.unwrap();

        let updated = update(
            &pool,
            r.id,
            ReservationUpdate {
                people: Some(4),
                first_name: None,
                last_name: None,
                mobile_number: None,
                reservation_date: None,
                reservation_time: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.people, 4);
        assert_eq!(updated.first_name, "Ada");

        set_status(&pool, r.id, ReservationStatus::Cancelled)
            .await
            .unwrap();
        let err = update(
            &pool,
            r.id,
            ReservationUpdate {
                people: Some(6),
                first_name: None,
                last_name: None,
                mobile_number: None,
                reservation_date: None,
                reservation_time: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn mobile_search_is_digits_only_and_partial() {
        let pool = test_pool().await;
        let mut grace = ada("2024-12-10", "18:00");
        grace.mobile_number = "(808) 555-0111".into();
        create(&pool, grace).await.unwrap();
        create(&pool, ada("2024-12-11", "19:00")).await.unwrap();

        let hits = search_by_mobile(&pool, "808-555").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].mobile_number, "(808) 555-0111");

        // Partial digits match both numbers containing "0100" or "0111"
        let hits = search_by_mobile(&pool, "555").await.unwrap();
        assert_eq!(hits.len(), 2);
    }
}
