use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    middleware,
    routing::get,
};
use validator::Validate;

use crate::{
    dto::collection::{
        CollectionResponse, UpsertCollectionEntryRequest, UpsertCollectionEntryResponse,
    },
    error::AppError,
    routes::auth::{CurrentUser, require_user},
    services::collection_service,
    state::SharedState,
};

use super::json_body;

/// Authenticated routes over the caller's collection.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route(
            "/collection",
            get(get_collection).post(upsert_collection_entry),
        )
        .route_layer(middleware::from_fn_with_state(state, require_user))
}

/// Return the caller's collection merged with catalog metadata.
#[utoipa::path(
    get,
    path = "/collection",
    tag = "collection",
    params(("X-User-Id" = String, Header, description = "User id forwarded by the identity proxy")),
    responses(
        (status = 200, description = "Collection and stats", body = CollectionResponse),
        (status = 401, description = "No authenticated user")
    )
)]
pub async fn get_collection(
    State(state): State<SharedState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<CollectionResponse>, AppError> {
    Ok(Json(
        collection_service::list_collection(&state, &user.id).await?,
    ))
}

/// Insert or update a game in the caller's collection.
#[utoipa::path(
    post,
    path = "/collection",
    tag = "collection",
    params(("X-User-Id" = String, Header, description = "User id forwarded by the identity proxy")),
    request_body = UpsertCollectionEntryRequest,
    responses(
        (status = 200, description = "Entry saved", body = UpsertCollectionEntryResponse),
        (status = 400, description = "Missing or invalid gameId/status"),
        (status = 401, description = "No authenticated user")
    )
)]
pub async fn upsert_collection_entry(
    State(state): State<SharedState>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<UpsertCollectionEntryRequest>, JsonRejection>,
) -> Result<Json<UpsertCollectionEntryResponse>, AppError> {
    let payload = json_body(payload)?;
    payload.validate()?;
    Ok(Json(
        collection_service::upsert_entry(&state, &user.id, payload).await?,
    ))
}
