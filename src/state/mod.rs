use std::sync::Arc;

use crate::{
    dao::store::{CatalogStore, CollectionStore},
    error::ServiceError,
    rawg::{GameMetadataSource, RawgError},
};

/// State handle cloned into every handler.
pub type SharedState = Arc<AppState>;

/// Central application state holding the document stores and the metadata client.
///
/// Nothing here caches document content; every request goes back to the stores.
pub struct AppState {
    catalog: Arc<dyn CatalogStore>,
    collections: Arc<dyn CollectionStore>,
    metadata: Option<Arc<dyn GameMetadataSource>>,
    user_header: String,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// Without a metadata source the proxy routes answer 503 and backfill is skipped.
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        collections: Arc<dyn CollectionStore>,
        metadata: Option<Arc<dyn GameMetadataSource>>,
        user_header: impl Into<String>,
    ) -> SharedState {
        Arc::new(Self {
            catalog,
            collections,
            metadata,
            user_header: user_header.into(),
        })
    }

    /// Catalog cache store.
    pub fn catalog(&self) -> &dyn CatalogStore {
        self.catalog.as_ref()
    }

    /// Per-user collection store.
    pub fn collections(&self) -> &dyn CollectionStore {
        self.collections.as_ref()
    }

    /// Metadata source, if one is configured.
    pub fn metadata(&self) -> Option<&dyn GameMetadataSource> {
        self.metadata.as_deref()
    }

    /// Metadata source or an error explaining why none is available.
    pub fn require_metadata(&self) -> Result<&dyn GameMetadataSource, ServiceError> {
        self.metadata()
            .ok_or(ServiceError::Upstream(RawgError::NotConfigured("missing API key")))
    }

    /// Name of the header carrying the authenticated user id.
    pub fn user_header(&self) -> &str {
        &self.user_header
    }
}
