use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
}

impl HealthResponse {
    /// Both documents are readable.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    /// At least one document cannot be read.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
        }
    }
}
