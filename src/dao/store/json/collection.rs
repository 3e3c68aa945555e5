use std::{path::PathBuf, sync::Arc};

use futures::future::BoxFuture;
use indexmap::IndexMap;

use crate::dao::{
    models::{EntryUpsert, UpsertReceipt, UserCollectionEntity},
    storage::{StorageError, StorageResult},
    store::CollectionStore,
};

use super::document::JsonDocument;

/// Collection document layout: user identifier to that user's collection.
type CollectionDocument = IndexMap<String, UserCollectionEntity>;

/// Per-user collections persisted as a single JSON object.
#[derive(Clone)]
pub struct JsonCollectionStore {
    document: Arc<JsonDocument<CollectionDocument>>,
}

impl JsonCollectionStore {
    /// Store reading and writing the document at `path`; the file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            document: Arc::new(JsonDocument::new(path)),
        }
    }
}

impl CollectionStore for JsonCollectionStore {
    fn find_user(
        &self,
        user_id: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserCollectionEntity>>> {
        let document = self.document.clone();
        Box::pin(async move {
            let mut collections = document.read().await?;
            Ok(collections.swap_remove(&user_id))
        })
    }

    fn upsert_entry(
        &self,
        user_id: String,
        upsert: EntryUpsert,
    ) -> BoxFuture<'static, StorageResult<UpsertReceipt>> {
        let document = self.document.clone();
        Box::pin(async move {
            document
                .update(move |collections| {
                    let collection = collections.entry(user_id).or_default();
                    let outcome = collection.upsert(upsert);
                    Ok::<_, StorageError>(UpsertReceipt {
                        outcome,
                        stats: collection.stats,
                    })
                })
                .await
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let document = self.document.clone();
        Box::pin(async move {
            document.read().await?;
            Ok(())
        })
    }
}
