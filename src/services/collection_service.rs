use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::{
    dao::models::{
        CatalogEntity, CollectionEntryEntity, CollectionStats, CollectionStatus, EntryUpsert,
        UpsertOutcome, timestamp_now,
    },
    dto::collection::{
        CollectionResponse, UpsertCollectionEntryRequest, UpsertCollectionEntryResponse,
    },
    error::ServiceError,
    services::catalog_service::{self, ResolvedGame},
    state::SharedState,
};

/// Return the user's collection merged with catalog metadata, caching games the catalog lacks.
pub async fn list_collection(
    state: &SharedState,
    user_id: &str,
) -> Result<CollectionResponse, ServiceError> {
    let collection = state
        .collections()
        .find_user(user_id.to_owned())
        .await?
        .unwrap_or_default();

    let mut catalog: HashMap<String, CatalogEntity> =
        state.catalog().list().await?.into_iter().collect();

    let mut missing: Vec<String> = Vec::new();
    for entry in &collection.games {
        if !catalog.contains_key(&entry.game_id) && !missing.contains(&entry.game_id) {
            missing.push(entry.game_id.clone());
        }
    }
    catalog.extend(catalog_service::backfill_missing(state, missing).await);

    let games = collection
        .games
        .iter()
        .map(|entry| merge_with_catalog(entry, catalog.get(&entry.game_id)))
        .collect();

    Ok(CollectionResponse {
        games,
        stats: CollectionStats::from_entries(&collection.games),
    })
}

/// Insert or update a game in the user's collection.
pub async fn upsert_entry(
    state: &SharedState,
    user_id: &str,
    request: UpsertCollectionEntryRequest,
) -> Result<UpsertCollectionEntryResponse, ServiceError> {
    let UpsertCollectionEntryRequest {
        game_id: Some(game_id),
        status: Some(status),
        reviews,
        completed_at,
        extra,
    } = request
    else {
        return Err(ServiceError::InvalidInput(
            "gameId and status are required".into(),
        ));
    };

    let status: CollectionStatus = status.parse().map_err(|_| {
        ServiceError::InvalidInput(
            "status must be one of: playing, completed, wishlist, dropped".into(),
        )
    })?;

    let resolved = match catalog_service::resolve_identifier(state, &game_id).await {
        Ok(resolved) => resolved,
        Err(err) => {
            warn!(%game_id, error = %err, "failed to resolve game identifier; using it verbatim");
            None
        }
    };

    let stored_id = resolved
        .as_ref()
        .map(|game| game.id.clone())
        .unwrap_or_else(|| game_id.clone());

    let upsert = EntryUpsert {
        game_id: stored_id.clone(),
        match_keys: match_keys(&game_id, resolved),
        status,
        reviews,
        completed_at,
        extra,
        now: timestamp_now(),
    };

    let receipt = state
        .collections()
        .upsert_entry(user_id.to_owned(), upsert)
        .await?;
    match receipt.outcome {
        UpsertOutcome::Inserted => {
            info!(%user_id, game_id = %stored_id, %status, "collection entry added")
        }
        UpsertOutcome::Updated => {
            info!(%user_id, game_id = %stored_id, %status, "collection entry updated")
        }
    }

    Ok(UpsertCollectionEntryResponse {
        success: true,
        message: format!("Game added with status: {status}"),
        game_id: stored_id,
        user_id: user_id.to_owned(),
        stats: receipt.stats,
    })
}

/// Identifiers an existing entry for this game may be stored under, most canonical first.
fn match_keys(game_id: &str, resolved: Option<ResolvedGame>) -> Vec<String> {
    let (resolved_id, slug) = match resolved {
        Some(ResolvedGame { id, slug }) => (Some(id), slug),
        None => (None, None),
    };

    let mut keys: Vec<String> = Vec::with_capacity(3);
    for key in resolved_id
        .into_iter()
        .chain(std::iter::once(game_id.to_owned()))
        .chain(slug)
    {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Entry fields overlaid with the cached catalog fields for the same game.
fn merge_with_catalog(
    entry: &CollectionEntryEntity,
    catalog: Option<&CatalogEntity>,
) -> Map<String, Value> {
    let mut merged = to_object(entry);
    if let Some(catalog) = catalog {
        merged.extend(to_object(catalog));
    }
    merged
}

fn to_object(value: &impl Serialize) -> Map<String, Value> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
