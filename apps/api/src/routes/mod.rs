//! HTTP routes.
//!
//! ```text
//! GET  /health                       - Liveness (database ping)
//!
//! # Auth
//! POST /auth/register                - Create account, returns token
//! POST /auth/login                   - Exchange credentials for token
//!
//! # Shops & catalog (bearer)
//! POST /shops                        - Create shop owned by caller
//! POST /products                     - Register product (shared catalog)
//!
//! # Shop-scoped (bearer, owner only)
//! POST /shops/{shop_id}/receipts     - Record sale (Idempotency-Key optional)
//! GET  /shops/{shop_id}/kpis         - KPIs, ?from=YYYY-MM-DD&to=YYYY-MM-DD
//! ```

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod auth;
pub mod health;
pub mod kpis;
pub mod products;
pub mod receipts;
pub mod shops;

/// Build the application router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(shops::router())
        .merge(products::router())
        .merge(receipts::router())
        .merge(kpis::router())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
