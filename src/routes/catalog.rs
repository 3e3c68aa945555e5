use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::get,
};
use validator::Validate;

use crate::{
    dto::catalog::{
        CatalogDeleteResponse, CatalogMutationResponse, CatalogQuery, CreateCatalogEntryRequest,
        UpdateCatalogEntryRequest,
    },
    error::AppError,
    services::catalog_service,
    state::SharedState,
};

use super::json_body;

/// Routes reading and editing the catalog cache.
pub fn router() -> Router<SharedState> {
    Router::new().route(
        "/catalog",
        get(get_catalog)
            .post(create_catalog_entry)
            .put(update_catalog_entry)
            .delete(delete_catalog_entry),
    )
}

/// Return one catalog entry when `id` is given, the whole catalog otherwise.
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    params(("id" = Option<String>, Query, description = "Identifier of a single game to return")),
    responses(
        (status = 200, description = "Catalog entry `{id, ...}` or listing `{games, total}`"),
        (status = 404, description = "Unknown identifier")
    )
)]
pub async fn get_catalog(
    State(state): State<SharedState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Response, AppError> {
    let response = match query.id() {
        Some(id) => Json(catalog_service::get_entry(&state, id).await?).into_response(),
        None => Json(catalog_service::list_entries(&state).await?).into_response(),
    };
    Ok(response)
}

/// Add a game to the catalog cache.
#[utoipa::path(
    post,
    path = "/catalog",
    tag = "catalog",
    request_body = CreateCatalogEntryRequest,
    responses(
        (status = 200, description = "Game added"),
        (status = 400, description = "Missing id or title"),
        (status = 409, description = "Identifier already present")
    )
)]
pub async fn create_catalog_entry(
    State(state): State<SharedState>,
    payload: Result<Json<CreateCatalogEntryRequest>, JsonRejection>,
) -> Result<Json<CatalogMutationResponse>, AppError> {
    let payload = json_body(payload)?;
    payload.validate()?;
    Ok(Json(catalog_service::create_entry(&state, payload).await?))
}

/// Merge fields into an existing catalog entry.
#[utoipa::path(
    put,
    path = "/catalog",
    tag = "catalog",
    request_body = UpdateCatalogEntryRequest,
    responses(
        (status = 200, description = "Game updated"),
        (status = 400, description = "Missing id"),
        (status = 404, description = "Unknown identifier")
    )
)]
pub async fn update_catalog_entry(
    State(state): State<SharedState>,
    payload: Result<Json<UpdateCatalogEntryRequest>, JsonRejection>,
) -> Result<Json<CatalogMutationResponse>, AppError> {
    let payload = json_body(payload)?;
    payload.validate()?;
    Ok(Json(catalog_service::update_entry(&state, payload).await?))
}

/// Remove a game from the catalog cache.
#[utoipa::path(
    delete,
    path = "/catalog",
    tag = "catalog",
    params(("id" = String, Query, description = "Identifier of the game to delete")),
    responses(
        (status = 200, description = "Game deleted"),
        (status = 400, description = "Missing id"),
        (status = 404, description = "Unknown identifier")
    )
)]
pub async fn delete_catalog_entry(
    State(state): State<SharedState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<CatalogDeleteResponse>, AppError> {
    Ok(Json(catalog_service::delete_entry(&state, query.id()).await?))
}
