//! DTO definitions used by the catalog REST API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::Validate;

use crate::dao::models::CatalogEntity;

/// Query accepted by the catalog read and delete routes.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub id: Option<String>,
}

impl CatalogQuery {
    /// Requested identifier, ignoring blank values.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

/// Payload adding a game to the catalog cache. Unknown fields are stored as-is.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCatalogEntryRequest {
    /// Catalog key; numbers are accepted.
    #[serde(default, deserialize_with = "super::lenient_id")]
    #[schema(value_type = String)]
    #[validate(required(message = "id and title are required"))]
    pub id: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "id and title are required"),
        length(min = 1, message = "id and title are required")
    )]
    pub title: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
}

/// Payload merging fields into an existing catalog entry.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCatalogEntryRequest {
    /// Catalog key of the entry to update; numbers are accepted.
    #[serde(default, deserialize_with = "super::lenient_id")]
    #[schema(value_type = String)]
    #[validate(required(message = "id is required"))]
    pub id: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
}

/// Catalog entry together with its identifier.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogItem {
    pub id: String,
    #[serde(flatten)]
    pub entry: CatalogEntity,
}

impl From<(String, CatalogEntity)> for CatalogItem {
    fn from((id, entry): (String, CatalogEntity)) -> Self {
        Self { id, entry }
    }
}

/// Full catalog listing.
#[derive(Debug, Serialize)]
pub struct CatalogListResponse {
    pub games: Vec<CatalogItem>,
    pub total: usize,
}

/// Result of a create or update.
#[derive(Debug, Serialize)]
pub struct CatalogMutationResponse {
    pub success: bool,
    pub message: String,
    pub game: CatalogItem,
}

/// Result of a delete.
#[derive(Debug, Serialize)]
pub struct CatalogDeleteResponse {
    pub success: bool,
    pub message: String,
    pub id: String,
}
