use std::{fmt, str::FromStr, time::SystemTime};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use utoipa::ToSchema;

/// Format a point in time as an RFC 3339 string, the format used for every persisted timestamp.
pub fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}

/// Current time formatted with [`format_system_time`].
pub fn timestamp_now() -> String {
    format_system_time(SystemTime::now())
}

/// Cached catalog metadata for a single game, keyed by its identifier in the catalog document.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntity {
    /// Display title of the game.
    pub title: String,
    /// Slug used by the external catalog, doubling as an alternate identifier.
    pub rawg_slug: Option<String>,
    /// Cover image URL.
    pub image: Option<String>,
    /// Last time this entry was written.
    pub last_updated_at: Option<String>,
    /// Any additional fields supplied by callers, stored verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogEntity {
    /// Build an entry from a title, leaving every optional field empty.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rawg_slug: None,
            image: None,
            last_updated_at: None,
            extra: Map::new(),
        }
    }
}

/// Closed set of statuses a tracked game can be in. Any status may move to any other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CollectionStatus {
    Playing,
    Completed,
    Wishlist,
    Dropped,
}

impl CollectionStatus {
    /// Every status, in the order used for stats and error messages.
    pub const ALL: [CollectionStatus; 4] = [
        CollectionStatus::Playing,
        CollectionStatus::Completed,
        CollectionStatus::Wishlist,
        CollectionStatus::Dropped,
    ];

    /// Lowercase name used on the wire and in the documents.
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionStatus::Playing => "playing",
            CollectionStatus::Completed => "completed",
            CollectionStatus::Wishlist => "wishlist",
            CollectionStatus::Dropped => "dropped",
        }
    }
}

impl fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status string is outside [`CollectionStatus::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl FromStr for CollectionStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        CollectionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_owned()))
    }
}

/// A game tracked by a user.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntryEntity {
    /// Catalog identifier (or slug) of the tracked game.
    pub game_id: String,
    /// Tracking status of the game.
    pub status: CollectionStatus,
    /// Free-form review payload supplied by the client.
    pub reviews: Option<Value>,
    /// Completion timestamp, kept verbatim when supplied by the client.
    pub completed_at: Option<String>,
    /// Any other fields the client sent with the entry.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-status counts derived from a user's entries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct CollectionStats {
    /// Number of entries.
    pub total: usize,
    /// Entries being played.
    pub playing: usize,
    /// Entries finished.
    pub completed: usize,
    /// Entries on the wishlist.
    pub wishlist: usize,
    /// Entries abandoned.
    pub dropped: usize,
}

impl CollectionStats {
    /// Recount stats from scratch; stats never carry information beyond the entries.
    pub fn from_entries(entries: &[CollectionEntryEntity]) -> Self {
        entries.iter().fold(
            Self {
                total: entries.len(),
                ..Self::default()
            },
            |mut stats, entry| {
                *stats.count_mut(entry.status) += 1;
                stats
            },
        )
    }

    /// Number of entries in the given status.
    pub fn count(&self, status: CollectionStatus) -> usize {
        match status {
            CollectionStatus::Playing => self.playing,
            CollectionStatus::Completed => self.completed,
            CollectionStatus::Wishlist => self.wishlist,
            CollectionStatus::Dropped => self.dropped,
        }
    }

    fn count_mut(&mut self, status: CollectionStatus) -> &mut usize {
        match status {
            CollectionStatus::Playing => &mut self.playing,
            CollectionStatus::Completed => &mut self.completed,
            CollectionStatus::Wishlist => &mut self.wishlist,
            CollectionStatus::Dropped => &mut self.dropped,
        }
    }
}

/// Everything a user tracks, as persisted in the collection document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserCollectionEntity {
    /// Tracked games in insertion order.
    #[serde(default)]
    pub games: Vec<CollectionEntryEntity>,
    /// Counts recomputed on every write.
    #[serde(default)]
    pub stats: CollectionStats,
}

/// Instructions for inserting or updating one entry of a user collection.
#[derive(Debug, Clone)]
pub struct EntryUpsert {
    /// Identifier written into the entry.
    pub game_id: String,
    /// Identifiers an existing entry may be stored under, in priority order.
    pub match_keys: Vec<String>,
    /// Status written into the entry.
    pub status: CollectionStatus,
    /// Review payload written into the entry.
    pub reviews: Option<Value>,
    /// Completion timestamp supplied by the caller; blank counts as absent.
    pub completed_at: Option<String>,
    /// Additional client fields stored alongside the entry.
    pub extra: Map<String, Value>,
    /// Timestamp used when the entry becomes completed without a supplied value.
    pub now: String,
}

/// Whether an upsert appended a new entry or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No entry matched; a new one was appended.
    Inserted,
    /// An existing entry was replaced in place.
    Updated,
}

/// What a persisted upsert did, with the stats recounted afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertReceipt {
    /// Whether the entry was appended or replaced.
    pub outcome: UpsertOutcome,
    /// Stats of the collection after the write.
    pub stats: CollectionStats,
}

impl UserCollectionEntity {
    /// Insert or overwrite the entry matching `upsert`, then recount stats.
    ///
    /// The first match key that identifies an existing entry wins. The matched entry is replaced
    /// as a whole. A `completed` upsert without a completion time is stamped with `now`.
    pub fn upsert(&mut self, upsert: EntryUpsert) -> UpsertOutcome {
        let EntryUpsert {
            game_id,
            match_keys,
            status,
            reviews,
            completed_at,
            extra,
            now,
        } = upsert;

        let position = match_keys
            .iter()
            .find_map(|key| self.games.iter().position(|entry| &entry.game_id == key));

        let completed_at = match (completed_at.filter(|value| !value.is_empty()), status) {
            (Some(supplied), _) => Some(supplied),
            (None, CollectionStatus::Completed) => Some(now),
            (None, _) => None,
        };

        let entry = CollectionEntryEntity {
            game_id,
            status,
            reviews,
            completed_at,
            extra,
        };

        let outcome = match position {
            Some(index) => {
                self.games[index] = entry;
                UpsertOutcome::Updated
            }
            None => {
                self.games.push(entry);
                UpsertOutcome::Inserted
            }
        };

        self.stats = CollectionStats::from_entries(&self.games);
        outcome
    }
}
