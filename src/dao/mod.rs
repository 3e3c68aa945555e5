/// Persisted entity definitions and the collection upsert rules.
pub mod models;
/// Storage error shared by every backend.
pub mod storage;
/// Catalog and collection store abstractions and their JSON implementation.
pub mod store;
