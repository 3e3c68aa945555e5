mod catalog;
mod collection;
mod config;
mod document;
mod error;

pub use catalog::JsonCatalogStore;
pub use collection::JsonCollectionStore;
pub use config::JsonStoreConfig;
pub use document::JsonDocument;
pub use error::{JsonDaoError, JsonResult};
