//! Dashboard view orchestration
//!
//! Given a target date, fetches reservations and tables concurrently and
//! keeps a per-concern error surface: a failed reservations fetch never
//! blanks the tables panel and vice versa. Navigating to a new date cancels
//! whatever the previous date still has in flight, so a slow stale response
//! can never overwrite fresher state.
//!
//! After a staff action the view re-fetches the current date (targeted
//! refresh, no full reload); on action failure the previous view state is
//! kept and the failure is recorded in `action_error`.

use chrono::NaiveDate;
use chrono_tz::Tz;
use tokio_util::sync::CancellationToken;

use crate::api::MesaApi;
use crate::http::HttpClient;
use crate::ClientError;
use shared::date;
use shared::models::{DiningTable, Reservation, ReservationStatus};

/// Rendered state of the dashboard for one date
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    /// The viewed date (`YYYY-MM-DD`), explicit input, never ambient state
    pub date: String,
    pub reservations: Vec<Reservation>,
    pub tables: Vec<DiningTable>,
    /// Per-concern errors, rendered non-fatally
    pub reservations_error: Option<String>,
    pub tables_error: Option<String>,
    pub action_error: Option<String>,
}

/// Staff dashboard controller
pub struct Dashboard<C: HttpClient> {
    api: MesaApi<C>,
    tz: Tz,
    view: DashboardView,
    /// Token for the in-flight load; superseded loads cancel it
    active: CancellationToken,
}

impl<C: HttpClient> Dashboard<C> {
    pub fn new(api: MesaApi<C>, tz: Tz) -> Self {
        Self {
            api,
            tz,
            view: DashboardView::default(),
            active: CancellationToken::new(),
        }
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Load the dashboard for `date` (absent date = today, the navigation
    /// contract). Cancels any still-running load for a previous date.
    pub async fn load(&mut self, date: Option<NaiveDate>) -> &DashboardView {
        let date = date.unwrap_or_else(|| date::today(self.tz));
        let date_str = date::format_date(date);

        // Supersede the previous load
        self.active.cancel();
        self.active = CancellationToken::new();
        let token = self.active.clone();

        let (reservations, tables) = tokio::join!(
            self.api.list_reservations(&date_str, &token),
            self.api.list_tables(&token),
        );

        self.view.date = date_str;
        self.view.action_error = None;
        self.apply_reservations(reservations);
        self.apply_tables(tables);
        &self.view
    }

    /// Navigate one day back.
    pub async fn go_previous(&mut self) -> &DashboardView {
        let date = self.current_date();
        self.load(Some(date::previous(date))).await
    }

    /// Navigate one day forward.
    pub async fn go_next(&mut self) -> &DashboardView {
        let date = self.current_date();
        self.load(Some(date::next(date))).await
    }

    /// Navigate to today.
    pub async fn go_today(&mut self) -> &DashboardView {
        self.load(None).await
    }

    /// Finish an occupied table, then refresh the current date.
    ///
    /// Confirmation ("this cannot be undone") is the rendering layer's job;
    /// by the time this runs the user already agreed.
    pub async fn finish_table(&mut self, table_id: i64) -> &DashboardView {
        let token = self.active.clone();
        match self.api.finish_table(table_id, &token).await {
            Ok(_) => self.refresh().await,
            Err(e) => self.record_action_error(e),
        }
        &self.view
    }

    /// Cancel a reservation, then refresh the current date.
    pub async fn cancel_reservation(&mut self, reservation_id: i64) -> &DashboardView {
        let token = self.active.clone();
        match self
            .api
            .change_reservation_status(reservation_id, ReservationStatus::Cancelled, &token)
            .await
        {
            Ok(_) => self.refresh().await,
            Err(e) => self.record_action_error(e),
        }
        &self.view
    }

    /// Seat a reservation at a table, then refresh the current date.
    pub async fn seat_reservation(
        &mut self,
        table_id: i64,
        reservation_id: i64,
    ) -> &DashboardView {
        let token = self.active.clone();
        match self.api.seat_table(table_id, reservation_id, &token).await {
            Ok(_) => self.refresh().await,
            Err(e) => self.record_action_error(e),
        }
        &self.view
    }

    fn current_date(&self) -> NaiveDate {
        date::parse_date(&self.view.date).unwrap_or_else(|_| date::today(self.tz))
    }

    /// Targeted re-fetch of the current date after a successful mutation.
    async fn refresh(&mut self) {
        let date = self.current_date();
        self.load(Some(date)).await;
    }

    fn record_action_error(&mut self, err: ClientError) {
        // Cancelled actions are expected on navigation, never surfaced
        if err.is_cancelled() {
            return;
        }
        tracing::warn!(error = %err, "Dashboard action failed");
        self.view.action_error = Some(err.to_string());
    }

    fn apply_reservations(&mut self, result: crate::ClientResult<Vec<Reservation>>) {
        match result {
            Ok(reservations) => {
                self.view.reservations = reservations;
                self.view.reservations_error = None;
            }
            Err(e) if e.is_cancelled() => {}
            Err(e) => {
                self.view.reservations_error = Some(e.to_string());
            }
        }
    }

    fn apply_tables(&mut self, result: crate::ClientResult<Vec<DiningTable>>) {
        match result {
            Ok(tables) => {
                self.view.tables = tables;
                self.view.tables_error = None;
            }
            Err(e) if e.is_cancelled() => {}
            Err(e) => {
                self.view.tables_error = Some(e.to_string());
            }
        }
    }
}
