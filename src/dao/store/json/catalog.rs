use std::{path::PathBuf, sync::Arc};

use futures::future::BoxFuture;
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::dao::{
    models::{CatalogEntity, timestamp_now},
    storage::{StorageError, StorageResult},
    store::CatalogStore,
};

use super::document::JsonDocument;

/// Catalog document layout: identifier to cached metadata, in document order.
type CatalogDocument = IndexMap<String, CatalogEntity>;

/// Catalog cache persisted as a single JSON object.
#[derive(Clone)]
pub struct JsonCatalogStore {
    document: Arc<JsonDocument<CatalogDocument>>,
}

impl JsonCatalogStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            document: Arc::new(JsonDocument::new(path)),
        }
    }
}

/// Overlay `fields` on top of `current`, keeping every field the patch does not mention.
fn merge_fields(
    id: &str,
    current: &CatalogEntity,
    fields: Map<String, Value>,
    now: String,
) -> StorageResult<CatalogEntity> {
    let invalid = |source| StorageError::InvalidRecord {
        id: id.to_owned(),
        source,
    };

    let mut merged = match serde_json::to_value(current).map_err(invalid)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    merged.extend(fields);
    merged.remove("id");
    merged.insert("last_updated_at".into(), Value::String(now));

    serde_json::from_value(Value::Object(merged)).map_err(invalid)
}

impl CatalogStore for JsonCatalogStore {
    fn get(&self, id: String) -> BoxFuture<'static, StorageResult<Option<CatalogEntity>>> {
        let document = self.document.clone();
        Box::pin(async move {
            let mut catalog = document.read().await?;
            Ok(catalog.swap_remove(&id))
        })
    }

    fn find_by_slug(
        &self,
        slug: String,
    ) -> BoxFuture<'static, StorageResult<Option<(String, CatalogEntity)>>> {
        let document = self.document.clone();
        Box::pin(async move {
            let catalog = document.read().await?;
            Ok(catalog
                .into_iter()
                .find(|(_, entry)| entry.rawg_slug.as_deref() == Some(slug.as_str())))
        })
    }

    fn list(&self) -> BoxFuture<'static, StorageResult<Vec<(String, CatalogEntity)>>> {
        let document = self.document.clone();
        Box::pin(async move { Ok(document.read().await?.into_iter().collect()) })
    }

    fn create(
        &self,
        id: String,
        mut entry: CatalogEntity,
    ) -> BoxFuture<'static, StorageResult<CatalogEntity>> {
        let document = self.document.clone();
        Box::pin(async move {
            document
                .update(move |catalog| {
                    if catalog.contains_key(&id) {
                        return Err(StorageError::conflict(id));
                    }
                    entry.last_updated_at = Some(timestamp_now());
                    catalog.insert(id, entry.clone());
                    Ok(entry)
                })
                .await
        })
    }

    fn replace_fields(
        &self,
        id: String,
        fields: Map<String, Value>,
    ) -> BoxFuture<'static, StorageResult<CatalogEntity>> {
        let document = self.document.clone();
        Box::pin(async move {
            document
                .update(move |catalog| {
                    let Some(current) = catalog.get_mut(&id) else {
                        return Err(StorageError::not_found(id));
                    };
                    let updated = merge_fields(&id, current, fields, timestamp_now())?;
                    *current = updated.clone();
                    Ok(updated)
                })
                .await
        })
    }

    fn remove(&self, id: String) -> BoxFuture<'static, StorageResult<()>> {
        let document = self.document.clone();
        Box::pin(async move {
            document
                .update(move |catalog| match catalog.shift_remove(&id) {
                    Some(_) => Ok(()),
                    None => Err(StorageError::not_found(id)),
                })
                .await
        })
    }

    fn insert_missing(
        &self,
        entries: Vec<(String, CatalogEntity)>,
    ) -> BoxFuture<'static, StorageResult<usize>> {
        let document = self.document.clone();
        Box::pin(async move {
            document
                .update(move |catalog| {
                    let mut inserted = 0;
                    for (id, entry) in entries {
                        if !catalog.contains_key(&id) {
                            catalog.insert(id, entry);
                            inserted += 1;
                        }
                    }
                    Ok::<_, StorageError>(inserted)
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
