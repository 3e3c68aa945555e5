//! Business logic behind the catalog routes, plus the catalog lookups the collection workflow
//! relies on: identifier resolution and backfilling entries from RAWG.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    dao::models::{CatalogEntity, timestamp_now},
    dto::catalog::{
        CatalogDeleteResponse, CatalogItem, CatalogListResponse, CatalogMutationResponse,
        CreateCatalogEntryRequest, UpdateCatalogEntryRequest,
    },
    error::ServiceError,
    rawg::RawgGame,
    state::SharedState,
};

/// Canonical identity of a game found in the catalog cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGame {
    /// Catalog key of the entry.
    pub id: String,
    /// Slug recorded for the entry, an alternate identifier for the same game.
    pub slug: Option<String>,
}

/// Fetch one catalog entry.
pub async fn get_entry(state: &SharedState, id: &str) -> Result<CatalogItem, ServiceError> {
    let Some(entry) = state.catalog().get(id.to_owned()).await? else {
        return Err(ServiceError::NotFound("Game not found".into()));
    };
    Ok(CatalogItem {
        id: id.to_owned(),
        entry,
    })
}

/// List every catalog entry in document order.
pub async fn list_entries(state: &SharedState) -> Result<CatalogListResponse, ServiceError> {
    let games: Vec<CatalogItem> = state
        .catalog()
        .list()
        .await?
        .into_iter()
        .map(CatalogItem::from)
        .collect();
    Ok(CatalogListResponse {
        total: games.len(),
        games,
    })
}

/// Add a game to the catalog cache; the identifier must not exist yet.
pub async fn create_entry(
    state: &SharedState,
    request: CreateCatalogEntryRequest,
) -> Result<CatalogMutationResponse, ServiceError> {
    let CreateCatalogEntryRequest {
        id: Some(id),
        title: Some(title),
        mut fields,
    } = request
    else {
        return Err(ServiceError::InvalidInput(
            "id and title are required".into(),
        ));
    };

    fields.insert("title".into(), Value::String(title));
    let entry: CatalogEntity = serde_json::from_value(Value::Object(fields))
        .map_err(|err| ServiceError::InvalidInput(format!("invalid game fields: {err}")))?;

    let entry = state.catalog().create(id.clone(), entry).await?;
    info!(%id, title = %entry.title, "catalog entry created");

    Ok(CatalogMutationResponse {
        success: true,
        message: "Game added successfully".into(),
        game: CatalogItem { id, entry },
    })
}

/// Merge the supplied fields into an existing catalog entry.
pub async fn update_entry(
    state: &SharedState,
    request: UpdateCatalogEntryRequest,
) -> Result<CatalogMutationResponse, ServiceError> {
    let UpdateCatalogEntryRequest {
        id: Some(id),
        fields,
    } = request
    else {
        return Err(ServiceError::InvalidInput("id is required".into()));
    };

    let entry = state.catalog().replace_fields(id.clone(), fields).await?;
    info!(%id, "catalog entry updated");

    Ok(CatalogMutationResponse {
        success: true,
        message: "Game updated successfully".into(),
        game: CatalogItem { id, entry },
    })
}

/// Remove a catalog entry.
pub async fn delete_entry(
    state: &SharedState,
    id: Option<&str>,
) -> Result<CatalogDeleteResponse, ServiceError> {
    let Some(id) = id else {
        return Err(ServiceError::InvalidInput("id is required".into()));
    };

    state.catalog().remove(id.to_owned()).await?;
    info!(%id, "catalog entry deleted");

    Ok(CatalogDeleteResponse {
        success: true,
        message: "Game deleted successfully".into(),
        id: id.to_owned(),
    })
}

/// Find the catalog entry a caller-supplied identifier refers to.
///
/// The identifier is tried as a catalog key first, then as a slug. This is a best-effort
/// heuristic: `None` only means the cache does not know the game.
pub async fn resolve_identifier(
    state: &SharedState,
    game_id: &str,
) -> Result<Option<ResolvedGame>, ServiceError> {
    if let Some(entry) = state.catalog().get(game_id.to_owned()).await? {
        return Ok(Some(ResolvedGame {
            id: game_id.to_owned(),
            slug: entry.rawg_slug,
        }));
    }

    let by_slug = state.catalog().find_by_slug(game_id.to_owned()).await?;
    Ok(by_slug.map(|(id, entry)| ResolvedGame {
        id,
        slug: entry.rawg_slug,
    }))
}

/// Fetch the given games from RAWG and cache them.
///
/// Each game is fetched on its own; a failure is logged and the game skipped. The fetched
/// entries are returned even if caching them fails.
pub async fn backfill_missing(
    state: &SharedState,
    ids: Vec<String>,
) -> Vec<(String, CatalogEntity)> {
    if ids.is_empty() {
        return Vec::new();
    }

    let Some(metadata) = state.metadata() else {
        warn!(
            missing = ids.len(),
            "game metadata API not configured; skipping catalog backfill"
        );
        return Vec::new();
    };

    let mut fetched = Vec::with_capacity(ids.len());
    for id in ids {
        let Ok(rawg_id) = id.parse::<u64>() else {
            debug!(%id, "identifier is not a RAWG id; skipping catalog backfill");
            continue;
        };

        match metadata.game_details(rawg_id).await {
            Ok(game) => fetched.push((id, catalog_entry_from_game(game))),
            Err(err) => warn!(%id, error = %err, "failed to fetch game from RAWG"),
        }
    }

    if !fetched.is_empty() {
        match state.catalog().insert_missing(fetched.clone()).await {
            Ok(inserted) => info!(inserted, "cached games fetched from RAWG"),
            Err(err) => warn!(error = %err, "failed to cache games fetched from RAWG"),
        }
    }

    fetched
}

/// Catalog entry cached for a game fetched from RAWG.
pub fn catalog_entry_from_game(game: RawgGame) -> CatalogEntity {
    CatalogEntity {
        rawg_slug: Some(game.slug.unwrap_or_else(|| slugify(&game.name))),
        image: game.background_image,
        last_updated_at: Some(timestamp_now()),
        ..CatalogEntity::titled(game.name)
    }
}

/// Lowercase `name` and replace each run of whitespace with a dash.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
