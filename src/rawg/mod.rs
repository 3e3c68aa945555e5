//! Client for the RAWG game metadata API.

mod client;
mod config;
mod error;
mod models;

pub use client::RawgClient;
pub use config::RawgConfig;
pub use error::{RawgError, RawgResult};
pub use models::{RawgGame, RawgGamePage, RawgGenre, RawgPlatform, RawgPlatformEntry, RawgScreenshot};

use futures::future::BoxFuture;

/// Source of game metadata, implemented by [`RawgClient`] and by test doubles.
pub trait GameMetadataSource: Send + Sync {
    /// Full-text search over the catalog.
    fn search_games(&self, query: String, page: u32) -> BoxFuture<'static, RawgResult<RawgGamePage>>;
    /// Games ordered by how often users added them.
    fn popular_games(&self, page: u32) -> BoxFuture<'static, RawgResult<RawgGamePage>>;
    /// Games ordered by Metacritic score.
    fn top_rated_games(&self, page: u32) -> BoxFuture<'static, RawgResult<RawgGamePage>>;
    /// Details of one game by its numeric identifier.
    fn game_details(&self, id: u64) -> BoxFuture<'static, RawgResult<RawgGame>>;
}
