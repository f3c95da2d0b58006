//! Repository Module
//!
//! CRUD and transition operations over the SQLite schema. Functions take
//! `&SqlitePool` directly; multi-entity transitions (seat/finish) run inside
//! a single transaction so table occupancy and reservation status never
//! diverge.

pub mod dining_table;
pub mod reservation;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Already occupied: {0}")]
    AlreadyOccupied(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Unix millis now — `created_at`/`updated_at` column convention.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
