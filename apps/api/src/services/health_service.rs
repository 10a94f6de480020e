//! Liveness check backed by the database.

use serde::Serialize;
use tally_db::Database;
use tracing::warn;

/// Overall service status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

/// `Ok` when the database answers, `Degraded` otherwise.
pub async fn check(db: &Database) -> HealthStatus {
    if db.health_check().await {
        HealthStatus::Ok
    } else {
        warn!("Health check failed: database unreachable");
        HealthStatus::Degraded
    }
}
