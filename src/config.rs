//! Application-level configuration loading: document locations, RAWG access, and the
//! identity header forwarded by the authentication proxy.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{dao::store::json::JsonStoreConfig, rawg::RawgConfig};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "GAMETRACK_BACK_CONFIG_PATH";
/// Environment variable holding the RAWG API key; wins over the config file.
const RAWG_API_KEY_ENV: &str = "RAWG_API_KEY";
/// Header carrying the authenticated user id when nothing else is configured.
pub const DEFAULT_USER_HEADER: &str = "x-user-id";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Locations of the catalog and collection documents.
    pub storage: JsonStoreConfig,
    /// RAWG endpoint, key, and timeout.
    pub rawg: RawgConfig,
    /// Lowercase name of the header carrying the authenticated user id.
    pub user_header: String,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let mut config = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    info!(path = %path.display(), "loaded configuration file");
                    raw.into()
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        if let Some(key) = env::var(RAWG_API_KEY_ENV).ok().filter(|key| !key.is_empty()) {
            config.rawg.api_key = Some(key);
        }

        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: JsonStoreConfig::default(),
            rawg: RawgConfig::default(),
            user_header: DEFAULT_USER_HEADER.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    data_dir: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    collection_path: Option<PathBuf>,
    rawg: RawRawgConfig,
    user_header: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRawgConfig {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let mut storage = value
            .data_dir
            .map(JsonStoreConfig::in_dir)
            .unwrap_or_default();
        if let Some(path) = value.catalog_path {
            storage = storage.with_catalog_path(path);
        }
        if let Some(path) = value.collection_path {
            storage = storage.with_collection_path(path);
        }

        let mut rawg = match value.rawg.api_key.filter(|key| !key.is_empty()) {
            Some(key) => RawgConfig::new(key),
            None => RawgConfig::default(),
        };
        if let Some(base_url) = value.rawg.base_url {
            rawg = rawg.with_base_url(base_url);
        }
        if let Some(secs) = value.rawg.timeout_secs {
            rawg.timeout = std::time::Duration::from_secs(secs);
        }

        let user_header = value
            .user_header
            .map(|header| header.trim().to_ascii_lowercase())
            .filter(|header| !header.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_HEADER.into());

        Self {
            storage,
            rawg,
            user_header,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
