/// Stores backed by whole-file JSON documents.
pub mod json;

use futures::future::BoxFuture;
use serde_json::{Map, Value};

use crate::dao::models::{CatalogEntity, EntryUpsert, UpsertReceipt, UserCollectionEntity};
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for the catalog cache.
pub trait CatalogStore: Send + Sync {
    /// Entry stored under `id`, if any.
    fn get(&self, id: String) -> BoxFuture<'static, StorageResult<Option<CatalogEntity>>>;
    /// First entry whose `rawg_slug` equals `slug`, with its identifier.
    fn find_by_slug(
        &self,
        slug: String,
    ) -> BoxFuture<'static, StorageResult<Option<(String, CatalogEntity)>>>;
    /// Every entry with its identifier, in document order.
    fn list(&self) -> BoxFuture<'static, StorageResult<Vec<(String, CatalogEntity)>>>;
    /// Store a new entry stamped with a fresh timestamp; fails when `id` exists.
    fn create(
        &self,
        id: String,
        entry: CatalogEntity,
    ) -> BoxFuture<'static, StorageResult<CatalogEntity>>;
    /// Shallow-merge `fields` over an existing entry and refresh its timestamp.
    fn replace_fields(
        &self,
        id: String,
        fields: Map<String, Value>,
    ) -> BoxFuture<'static, StorageResult<CatalogEntity>>;
    /// Delete the entry stored under `id`; fails when it is absent.
    fn remove(&self, id: String) -> BoxFuture<'static, StorageResult<()>>;
    /// Insert entries whose identifier is not yet present, returning how many were added.
    fn insert_missing(
        &self,
        entries: Vec<(String, CatalogEntity)>,
    ) -> BoxFuture<'static, StorageResult<usize>>;
    /// Check that the backing document can be read.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}

/// Abstraction over the persistence layer for per-user collections.
pub trait CollectionStore: Send + Sync {
    /// Collection of `user_id`, or `None` when the user has never tracked a game.
    fn find_user(
        &self,
        user_id: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserCollectionEntity>>>;
    /// Apply `upsert` to the user's collection and persist it.
    fn upsert_entry(
        &self,
        user_id: String,
        upsert: EntryUpsert,
    ) -> BoxFuture<'static, StorageResult<UpsertReceipt>>;
    /// Check that the backing document can be read.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
