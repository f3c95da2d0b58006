//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity (桌台)
///
/// `reservation_id` is the occupancy reference: `None` means the table is
/// free, `Some(id)` means it is occupied by that active reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub name: String,
    pub capacity: i32,
    pub reservation_id: Option<i64>,
}

impl DiningTable {
    pub fn is_occupied(&self) -> bool {
        self.reservation_id.is_some()
    }
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub name: String,
    pub capacity: i32,
    /// Optional: seed the table already occupied by a booked reservation.
    pub reservation_id: Option<i64>,
}

/// Seat request payload for `PUT /api/tables/{id}/seat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatRequest {
    pub reservation_id: i64,
}
