//! # Tally API
//!
//! HTTP service for multi-tenant point-of-sale receipt intake and KPIs.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tally API                                       │
//! │                                                                         │
//! │  POS client ───► axum router (routes/) ───► services/ ───► tally-db    │
//! │                       │                         │                       │
//! │                       ▼                         ▼                       │
//! │              extract::CurrentUser         tally-core                    │
//! │              (bearer JWT → User)          (validation, totals,          │
//! │                                            date windows)                │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  auth          │  │  shops         │  │  receipts                  ││
//! │  │ • register     │  │ • create       │  │ • create (Idempotency-Key) ││
//! │  │ • login        │  │ • owner guard  │  │                            ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  products      │  │  kpis          │  │  health                    ││
//! │  │ • create/get   │  │ • per shop     │  │ • database ping            ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (an optional `.env` file is loaded first):
//! - `HTTP_HOST` / `HTTP_PORT` - Listen address (default: `0.0.0.0:8000`)
//! - `DATABASE_PATH` - SQLite file (default: `./tally.db`)
//! - `DATABASE_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `JWT_SECRET` - Secret for JWT signing
//! - `ACCESS_TOKEN_EXPIRE_MINUTES` - Token lifetime (default: 60)

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod services;
pub mod state;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ErrorCode};
pub use routes::router;
pub use state::AppState;
