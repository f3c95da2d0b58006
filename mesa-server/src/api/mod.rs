//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`reservations`] - 预订管理接口
//! - [`tables`] - 桌台管理接口 (入座/清台)

pub mod health;
pub mod reservations;
pub mod tables;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
