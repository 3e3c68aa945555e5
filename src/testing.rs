//! Test doubles for the external metadata API, usable from unit and integration tests.

use std::{
    collections::{HashMap, HashSet},
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use futures::future::BoxFuture;
use reqwest::StatusCode;

use crate::{
    config::DEFAULT_USER_HEADER,
    dao::store::json::{JsonCatalogStore, JsonCollectionStore, JsonStoreConfig},
    rawg::{GameMetadataSource, RawgError, RawgGame, RawgGamePage, RawgResult},
    state::{AppState, SharedState},
};

/// Application state backed by JSON documents inside `dir`.
pub fn json_state(dir: &Path, metadata: Option<MockMetadataSource>) -> SharedState {
    let storage = JsonStoreConfig::in_dir(dir);
    AppState::new(
        Arc::new(JsonCatalogStore::open(storage.catalog_path)),
        Arc::new(JsonCollectionStore::open(storage.collection_path)),
        metadata.map(|mock| Arc::new(mock) as Arc<dyn GameMetadataSource>),
        DEFAULT_USER_HEADER,
    )
}

#[derive(Debug, Default)]
struct Inner {
    games: HashMap<u64, RawgGame>,
    failing: HashSet<u64>,
    detail_requests: Vec<u64>,
}

/// In-memory [`GameMetadataSource`] with configurable games and failures.
///
/// Unknown ids answer `NotFound`; ids marked with [`MockMetadataSource::fail_on`] answer a
/// server error. Listings return every known game ordered by id.
#[derive(Debug, Clone, Default)]
pub struct MockMetadataSource {
    inner: Arc<Mutex<Inner>>,
}

impl MockMetadataSource {
    /// Source with no games.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a game returned by lookups and listings.
    pub fn add_game(&self, game: RawgGame) {
        self.lock().games.insert(game.id, game);
    }

    /// Make detail lookups for `id` fail with an upstream error.
    pub fn fail_on(&self, id: u64) {
        self.lock().failing.insert(id);
    }

    /// Ids passed to `game_details`, in call order.
    pub fn detail_requests(&self) -> Vec<u64> {
        self.lock().detail_requests.clone()
    }

    fn page(&self, filter: impl Fn(&RawgGame) -> bool) -> RawgGamePage {
        let inner = self.lock();
        let mut results: Vec<RawgGame> = inner.games.values().filter(|g| filter(g)).cloned().collect();
        results.sort_by_key(|game| game.id);
        RawgGamePage {
            count: results.len() as u64,
            next: None,
            previous: None,
            results,
        }
    }
}

/// Minimal game payload with only the fields the backend relies on.
pub fn rawg_game(id: u64, name: &str) -> RawgGame {
    RawgGame {
        id,
        name: name.into(),
        slug: None,
        released: None,
        background_image: Some(format!("https://media.example/{id}.jpg")),
        rating: None,
        rating_top: None,
        ratings_count: None,
        metacritic: None,
        playtime: None,
        platforms: Vec::new(),
        genres: Vec::new(),
        short_screenshots: Vec::new(),
    }
}

impl GameMetadataSource for MockMetadataSource {
    fn search_games(&self, query: String, _page: u32) -> BoxFuture<'static, RawgResult<RawgGamePage>> {
        let needle = query.to_lowercase();
        let page = self.page(|game| game.name.to_lowercase().contains(&needle));
        Box::pin(async move { Ok(page) })
    }

    fn popular_games(&self, _page: u32) -> BoxFuture<'static, RawgResult<RawgGamePage>> {
        let page = self.page(|_| true);
        Box::pin(async move { Ok(page) })
    }

    fn top_rated_games(&self, _page: u32) -> BoxFuture<'static, RawgResult<RawgGamePage>> {
        let page = self.page(|game| game.metacritic.is_some());
        Box::pin(async move { Ok(page) })
    }

    fn game_details(&self, id: u64) -> BoxFuture<'static, RawgResult<RawgGame>> {
        let outcome = {
            let mut inner = self.lock();
            inner.detail_requests.push(id);
            let path = format!("games/{id}");
            if inner.failing.contains(&id) {
                Err(RawgError::RequestStatus {
                    path,
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                })
            } else {
                inner.games.get(&id).cloned().ok_or(RawgError::NotFound { path })
            }
        };
        Box::pin(async move { outcome })
    }
}
