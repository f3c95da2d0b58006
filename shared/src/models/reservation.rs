//! Reservation Model
//!
//! The status lifecycle lives here so that every crate validating a
//! transition (server repository, client orchestration) shares one edge set.

use serde::{Deserialize, Serialize};

/// Reservation status lifecycle
///
/// ```text
/// booked ──→ seated ──→ finished
///    │          │
///    └──────────┴─────→ cancelled
/// ```
///
/// `finished` and `cancelled` are terminal. Stored as lowercase TEXT in the
/// schema; unknown strings are rejected at the serde boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Booked,
    Seated,
    Finished,
    Cancelled,
}

impl Default for ReservationStatus {
    fn default() -> Self {
        Self::Booked
    }
}

impl ReservationStatus {
    /// Whether the edge `self → next` is in the allowed set.
    ///
    /// Note `Booked → Seated` is legal here but the status API still rejects
    /// it: seating must go through the seat-at-table operation so that table
    /// occupancy is updated in the same transaction.
    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Booked, Seated) | (Seated, Finished) | (Booked, Cancelled) | (Seated, Cancelled)
        )
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Seated => "seated",
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booked" => Ok(Self::Booked),
            "seated" => Ok(Self::Seated),
            "finished" => Ok(Self::Finished),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("Unknown reservation status: {other}")),
        }
    }
}

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    /// Calendar date, `YYYY-MM-DD`
    pub reservation_date: String,
    /// Time of day, `HH:MM`
    pub reservation_time: String,
    /// Party size, >= 1
    pub people: i32,
    pub status: ReservationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: String,
    pub reservation_time: String,
    pub people: i32,
    /// New reservations are always `booked`; any other value is rejected.
    #[serde(default)]
    pub status: Option<ReservationStatus>,
}

/// Edit reservation payload (only `booked` reservations may be edited)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile_number: Option<String>,
    pub reservation_date: Option<String>,
    pub reservation_time: Option<String>,
    pub people: Option<i32>,
}

/// Status transition payload for `PUT /api/reservations/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ReservationStatus,
}
