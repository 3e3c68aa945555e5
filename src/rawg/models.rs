use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};
use utoipa::ToSchema;

/// One page of RAWG game results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct RawgGamePage {
    /// Total number of matches across all pages.
    pub count: u64,
    /// URL of the next page, if any.
    pub next: Option<String>,
    /// URL of the previous page, if any.
    pub previous: Option<String>,
    /// Games on this page.
    pub results: Vec<RawgGame>,
}

/// Game metadata as returned by RAWG. Only `id` and `name` are guaranteed.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct RawgGame {
    /// RAWG identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// URL slug, also accepted by RAWG as an identifier.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub released: Option<String>,
    /// Cover image URL.
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub rating_top: Option<u32>,
    #[serde(default)]
    pub ratings_count: Option<u64>,
    /// Metacritic score out of 100.
    #[serde(default)]
    pub metacritic: Option<u32>,
    #[serde(default)]
    pub playtime: Option<u32>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub platforms: Vec<RawgPlatformEntry>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub genres: Vec<RawgGenre>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub short_screenshots: Vec<RawgScreenshot>,
}

/// Wrapper RAWG puts around each platform of a game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct RawgPlatformEntry {
    pub platform: RawgPlatform,
}

/// Platform a game runs on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct RawgPlatform {
    pub id: u64,
    pub name: String,
}

/// Genre tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct RawgGenre {
    pub id: u64,
    pub name: String,
}

/// Screenshot thumbnail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct RawgScreenshot {
    pub id: u64,
    pub image: String,
}
