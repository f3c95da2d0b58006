//! Mesa Client - 员工仪表盘客户端
//!
//! Typed access to the mesa-server REST API plus the dashboard view
//! orchestration: concurrent fetches, per-concern error surfaces, and
//! cancellation of superseded requests on date navigation.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod http;

pub use api::MesaApi;
pub use dashboard::{Dashboard, DashboardView};
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
