use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{
    GameMetadataSource,
    config::RawgConfig,
    error::{RawgError, RawgResult},
    models::{RawgGame, RawgGamePage},
};

const SEARCH_PAGE_SIZE: u32 = 20;
const LISTING_PAGE_SIZE: u32 = 16;

/// HTTP client for the RAWG REST API.
#[derive(Clone)]
pub struct RawgClient {
    client: Client,
    base_url: Arc<str>,
    api_key: Arc<str>,
}

impl RawgClient {
    /// Build a client; fails when no API key is configured.
    pub fn new(config: RawgConfig) -> RawgResult<Self> {
        let api_key = config
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(RawgError::NotConfigured("missing API key"))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| RawgError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            api_key: Arc::from(api_key),
        })
    }

    async fn get_json<T>(&self, path: String, mut query: Vec<(&'static str, String)>) -> RawgResult<T>
    where
        T: DeserializeOwned,
    {
        debug!(%path, ?query, "RAWG request");
        query.push(("key", self.api_key.to_string()));

        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(|source| RawgError::RequestSend {
                path: path.clone(),
                source,
            })?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|source| RawgError::DecodeResponse { path, source }),
            StatusCode::NOT_FOUND => Err(RawgError::NotFound { path }),
            StatusCode::TOO_MANY_REQUESTS => Err(RawgError::RateLimited),
            status => Err(RawgError::RequestStatus { path, status }),
        }
    }

    fn listing(&self, ordering: &'static str, page: u32) -> BoxFuture<'static, RawgResult<RawgGamePage>> {
        let this = self.clone();
        Box::pin(async move {
            this.get_json(
                "games".into(),
                vec![
                    ("ordering", ordering.to_string()),
                    ("page", page.to_string()),
                    ("page_size", LISTING_PAGE_SIZE.to_string()),
                ],
            )
            .await
        })
    }
}

impl GameMetadataSource for RawgClient {
    fn search_games(&self, query: String, page: u32) -> BoxFuture<'static, RawgResult<RawgGamePage>> {
        let this = self.clone();
        Box::pin(async move {
            this.get_json(
                "games".into(),
                vec![
                    ("search", query),
                    ("page", page.to_string()),
                    ("page_size", SEARCH_PAGE_SIZE.to_string()),
                ],
            )
            .await
        })
    }

    fn popular_games(&self, page: u32) -> BoxFuture<'static, RawgResult<RawgGamePage>> {
        self.listing("-added", page)
    }

    fn top_rated_games(&self, page: u32) -> BoxFuture<'static, RawgResult<RawgGamePage>> {
        self.listing("-metacritic", page)
    }

    fn game_details(&self, id: u64) -> BoxFuture<'static, RawgResult<RawgGame>> {
        let this = self.clone();
        Box::pin(async move { this.get_json(format!("games/{id}"), Vec::new()).await })
    }
}
