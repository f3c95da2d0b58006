//! Typed API surface over [`HttpClient`]
//!
//! Every call takes a [`CancellationToken`]; when navigation supersedes an
//! in-flight request the future is dropped and `ClientError::Cancelled`
//! comes back instead of a stale response.

use tokio_util::sync::CancellationToken;

use crate::http::HttpClient;
use crate::{ClientError, ClientResult};
use shared::models::{
    DiningTable, DiningTableCreate, Reservation, ReservationCreate, ReservationStatus,
    ReservationUpdate, SeatRequest, StatusUpdate,
};

/// Reservation service API client
#[derive(Debug, Clone)]
pub struct MesaApi<C: HttpClient> {
    http: C,
}

impl<C: HttpClient> MesaApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    /// Access the underlying transport (tests swap in a mock).
    pub fn http(&self) -> &C {
        &self.http
    }

    /// GET /api/reservations?date=... — date-scoped, time-ascending list
    pub async fn list_reservations(
        &self,
        date: &str,
        cancel: &CancellationToken,
    ) -> ClientResult<Vec<Reservation>> {
        cancellable(cancel, self.http.get(&format!("api/reservations?date={date}"))).await
    }

    /// GET /api/reservations?mobile_number=... — phone search, any status
    pub async fn search_reservations(
        &self,
        mobile_number: &str,
        cancel: &CancellationToken,
    ) -> ClientResult<Vec<Reservation>> {
        cancellable(
            cancel,
            self.http
                .get(&format!("api/reservations?mobile_number={mobile_number}")),
        )
        .await
    }

    /// GET /api/tables — all tables with occupancy state
    pub async fn list_tables(&self, cancel: &CancellationToken) -> ClientResult<Vec<DiningTable>> {
        cancellable(cancel, self.http.get("api/tables")).await
    }

    /// POST /api/reservations
    pub async fn create_reservation(
        &self,
        payload: &ReservationCreate,
        cancel: &CancellationToken,
    ) -> ClientResult<Reservation> {
        cancellable(cancel, self.http.post("api/reservations", payload)).await
    }

    /// PUT /api/reservations/{id} — edit, booked only
    pub async fn update_reservation(
        &self,
        id: i64,
        payload: &ReservationUpdate,
        cancel: &CancellationToken,
    ) -> ClientResult<Reservation> {
        cancellable(cancel, self.http.put(&format!("api/reservations/{id}"), payload)).await
    }

    /// PUT /api/reservations/{id}/status
    pub async fn change_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
        cancel: &CancellationToken,
    ) -> ClientResult<Reservation> {
        let body = StatusUpdate { status };
        cancellable(
            cancel,
            self.http.put(&format!("api/reservations/{id}/status"), &body),
        )
        .await
    }

    /// POST /api/tables
    pub async fn create_table(
        &self,
        payload: &DiningTableCreate,
        cancel: &CancellationToken,
    ) -> ClientResult<DiningTable> {
        cancellable(cancel, self.http.post("api/tables", payload)).await
    }

    /// PUT /api/tables/{id}/seat — atomic seat
    pub async fn seat_table(
        &self,
        table_id: i64,
        reservation_id: i64,
        cancel: &CancellationToken,
    ) -> ClientResult<DiningTable> {
        let body = SeatRequest { reservation_id };
        cancellable(cancel, self.http.put(&format!("api/tables/{table_id}/seat"), &body)).await
    }

    /// DELETE /api/tables/{id}/seat — atomic finish
    pub async fn finish_table(
        &self,
        table_id: i64,
        cancel: &CancellationToken,
    ) -> ClientResult<DiningTable> {
        cancellable(cancel, self.http.delete(&format!("api/tables/{table_id}/seat"))).await
    }
}

/// Race the request against its cancellation token.
///
/// Dropping the reqwest future aborts the underlying connection.
async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = ClientResult<T>>,
) -> ClientResult<T> {
    tokio::select! {
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        result = fut => result,
    }
}
