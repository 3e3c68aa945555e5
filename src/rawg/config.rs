use std::time::Duration;

/// Public RAWG endpoint used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtime configuration describing how to reach RAWG.
#[derive(Debug, Clone)]
pub struct RawgConfig {
    /// API root, without trailing slash.
    pub base_url: String,
    /// Key sent with every request; the client is disabled without one.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RawgConfig {
    /// Construct a configuration against the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Point the client at another endpoint, e.g. a local mirror.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for RawgConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
