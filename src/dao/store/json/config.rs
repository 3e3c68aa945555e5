use std::path::{Path, PathBuf};

const DEFAULT_DATA_DIR: &str = "data";
const CATALOG_FILE_NAME: &str = "games.json";
const COLLECTION_FILE_NAME: &str = "user_data.json";

/// Locations of the two JSON documents backing the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonStoreConfig {
    /// Catalog cache document.
    pub catalog_path: PathBuf,
    /// Per-user collections document.
    pub collection_path: PathBuf,
}

impl JsonStoreConfig {
    /// Place both documents under `data_dir` using their conventional file names.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            catalog_path: data_dir.join(CATALOG_FILE_NAME),
            collection_path: data_dir.join(COLLECTION_FILE_NAME),
        }
    }

    /// Override the catalog document location.
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    /// Override the collection document location.
    pub fn with_collection_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.collection_path = path.into();
        self
    }
}

impl Default for JsonStoreConfig {
    fn default() -> Self {
        Self::in_dir(DEFAULT_DATA_DIR)
    }
}
