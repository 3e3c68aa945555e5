//! DTO definitions used by the collection REST API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::Validate;

use crate::dao::models::CollectionStats;

/// Payload tracking a game in the caller's collection.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCollectionEntryRequest {
    /// Catalog identifier or slug; numbers are accepted.
    #[serde(default, deserialize_with = "super::lenient_id")]
    #[schema(value_type = String)]
    #[validate(required(message = "gameId and status are required"))]
    pub game_id: Option<String>,
    /// One of `playing`, `completed`, `wishlist`, `dropped`.
    #[serde(default)]
    #[schema(value_type = String)]
    #[validate(
        required(message = "gameId and status are required"),
        length(min = 1, message = "gameId and status are required")
    )]
    pub status: Option<String>,
    /// Free-form review payload.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub reviews: Option<Value>,
    /// Completion time; defaults to now for `completed` entries.
    #[serde(default)]
    pub completed_at: Option<String>,
    /// Any other fields, stored with the entry as-is.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

/// A user's collection, each entry merged with its cached catalog metadata.
#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionResponse {
    #[schema(value_type = Vec<Object>)]
    pub games: Vec<Map<String, Value>>,
    pub stats: CollectionStats,
}

/// Result of a collection upsert.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCollectionEntryResponse {
    pub success: bool,
    pub message: String,
    pub game_id: String,
    pub user_id: String,
    pub stats: CollectionStats,
}
