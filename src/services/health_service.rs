use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report `ok` when both documents can be read, `degraded` otherwise.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let catalog = state.catalog().health_check().await;
    let collections = state.collections().health_check().await;

    let mut healthy = true;
    if let Err(err) = catalog {
        warn!(error = %err, "catalog document health check failed");
        healthy = false;
    }
    if let Err(err) = collections {
        warn!(error = %err, "collection document health check failed");
        healthy = false;
    }

    if healthy {
        HealthResponse::ok()
    } else {
        HealthResponse::degraded()
    }
}
