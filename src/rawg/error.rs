use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`RawgError`] failures.
pub type RawgResult<T> = Result<T, RawgError>;

/// Failures that can occur while talking to RAWG.
#[derive(Debug, Error)]
pub enum RawgError {
    /// No API key was configured.
    #[error("RAWG client is not configured: {0}")]
    NotConfigured(&'static str),
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build RAWG client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent or timed out.
    #[error("failed to send RAWG request to `{path}`")]
    RequestSend {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    /// RAWG has no resource at `path`.
    #[error("RAWG resource `{path}` not found")]
    NotFound { path: String },
    /// RAWG asked us to slow down.
    #[error("RAWG rate limit exceeded")]
    RateLimited,
    /// RAWG answered with an unexpected status code.
    #[error("unexpected RAWG response status {status} for `{path}`")]
    RequestStatus { path: String, status: StatusCode },
    /// The response body did not match the expected layout.
    #[error("failed to decode RAWG response for `{path}`")]
    DecodeResponse {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}
