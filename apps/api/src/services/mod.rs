//! Application services.
//!
//! Each service owns one use case: it runs the authorization guard, calls
//! into `tally-core` for validation and `tally-db` for storage, and speaks
//! [`ApiError`](crate::error::ApiError). Route handlers stay thin.

pub mod auth_service;
pub mod catalog_service;
pub mod health_service;
pub mod kpi_service;
pub mod receipt_service;
pub mod shop_service;
