use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the game tracker backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::catalog::get_catalog,
        crate::routes::catalog::create_catalog_entry,
        crate::routes::catalog::update_catalog_entry,
        crate::routes::catalog::delete_catalog_entry,
        crate::routes::collection::get_collection,
        crate::routes::collection::upsert_collection_entry,
        crate::routes::discovery::search_games,
        crate::routes::discovery::popular_games,
        crate::routes::discovery::top_rated_games,
        crate::routes::discovery::game_details,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::catalog::CreateCatalogEntryRequest,
            crate::dto::catalog::UpdateCatalogEntryRequest,
            crate::dto::collection::UpsertCollectionEntryRequest,
            crate::dto::collection::UpsertCollectionEntryResponse,
            crate::dto::collection::CollectionResponse,
            crate::dao::models::CollectionStats,
            crate::dao::models::CollectionStatus,
            crate::rawg::RawgGamePage,
            crate::rawg::RawgGame,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Cached game metadata"),
        (name = "collection", description = "Per-user game collections"),
        (name = "discovery", description = "RAWG search and listings"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_mutations_document_their_request_bodies() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        let catalog = &doc["paths"]["/catalog"];
        for method in ["post", "put"] {
            assert!(
                catalog[method]["requestBody"].is_object(),
                "{method} /catalog has no request body"
            );
        }
        let schemas = &doc["components"]["schemas"];
        assert!(schemas["CreateCatalogEntryRequest"].is_object());
        assert!(schemas["UpdateCatalogEntryRequest"].is_object());
    }
}
