/// Catalog cache operations, identifier resolution, and RAWG backfill.
pub mod catalog_service;
/// Collection listing and the upsert workflow.
pub mod collection_service;
/// Thin RAWG proxy used by the search and discovery pages.
pub mod discovery_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
