use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::discovery::{PageQuery, SearchQuery},
    error::AppError,
    rawg::{RawgGame, RawgGamePage},
    services::discovery_service,
    state::SharedState,
};

/// RAWG proxy routes used by the search and browse pages.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/rawg/search", get(search_games))
        .route("/rawg/popular", get(popular_games))
        .route("/rawg/top-rated", get(top_rated_games))
        .route("/rawg/games/{id}", get(game_details))
}

/// Search games by name.
#[utoipa::path(
    get,
    path = "/rawg/search",
    tag = "discovery",
    params(
        ("q" = String, Query, description = "Search text"),
        ("page" = Option<u32>, Query, description = "1-based page number")
    ),
    responses((status = 200, description = "Matching games", body = RawgGamePage))
)]
pub async fn search_games(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<RawgGamePage>, AppError> {
    Ok(Json(discovery_service::search(&state, query).await?))
}

#[utoipa::path(
    get,
    path = "/rawg/popular",
    tag = "discovery",
    params(("page" = Option<u32>, Query, description = "1-based page number")),
    responses((status = 200, description = "Most added games", body = RawgGamePage))
)]
pub async fn popular_games(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<RawgGamePage>, AppError> {
    Ok(Json(discovery_service::popular(&state, query).await?))
}

#[utoipa::path(
    get,
    path = "/rawg/top-rated",
    tag = "discovery",
    params(("page" = Option<u32>, Query, description = "1-based page number")),
    responses((status = 200, description = "Best Metacritic scores", body = RawgGamePage))
)]
pub async fn top_rated_games(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<RawgGamePage>, AppError> {
    Ok(Json(discovery_service::top_rated(&state, query).await?))
}

/// Full details for one game.
#[utoipa::path(
    get,
    path = "/rawg/games/{id}",
    tag = "discovery",
    params(("id" = u64, Path, description = "RAWG game identifier")),
    responses(
        (status = 200, description = "Game details", body = RawgGame),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn game_details(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<RawgGame>, AppError> {
    Ok(Json(discovery_service::details(&state, id).await?))
}
