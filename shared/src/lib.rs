//! Shared types for Mesa
//!
//! Common types used across the server and client crates: domain models,
//! the reservation status state machine, and calendar-date helpers.

pub mod date;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    DiningTable, DiningTableCreate, Reservation, ReservationCreate, ReservationStatus,
    ReservationUpdate, SeatRequest, StatusUpdate,
};
