//! File-backed history and favorites.
//!
//! One JSON document holds both lists, most recent first:
//!
//! ```json
//! {
//!   "history":   [{"code": "...", "type": "role", "elementTag": "BUTTON", "timestamp": 1700000000000}],
//!   "favorites": [{"id": 1700000000000, "code": "...", "type": "role", "elementTag": "BUTTON", "timestamp": 1700000000000}]
//! }
//! ```

use std::path::{Path, PathBuf};

use loupe::HistoryEntry;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// A history entry stamped with its recording time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    /// Recorded locator
    #[serde(flatten)]
    pub entry: HistoryEntry,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// A pinned locator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// Identifier used for removal
    pub id: i64,
    /// Pinned locator
    #[serde(flatten)]
    pub entry: HistoryEntry,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    history: Vec<StoredEntry>,
    #[serde(default)]
    favorites: Vec<Favorite>,
}

/// History and favorites persisted as one JSON file
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    max_history: usize,
    data: StoreData,
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl HistoryStore {
    /// `~/.loupe/history.json`
    pub fn default_path() -> CliResult<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".loupe").join("history.json"))
            .ok_or_else(|| CliError::store("cannot locate home directory; pass --store"))
    }

    /// Load the store at `path`; a missing or empty file starts empty
    pub fn open(path: impl Into<PathBuf>, max_history: usize) -> CliResult<Self> {
        let path = path.into();
        let data = if path.exists() {
            let source = std::fs::read_to_string(&path)?;
            if source.trim().is_empty() {
                StoreData::default()
            } else {
                serde_json::from_str(&source).map_err(|e| {
                    CliError::store(format!("{} is not a history file: {e}", path.display()))
                })?
            }
        } else {
            StoreData::default()
        };
        debug!(
            path = %path.display(),
            history = data.history.len(),
            favorites = data.favorites.len(),
            "history store opened"
        );
        Ok(Self {
            path,
            max_history,
            data,
        })
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Recorded entries, most recent first
    #[must_use]
    pub fn history(&self) -> &[StoredEntry] {
        &self.data.history
    }

    /// Favorites, most recent first
    #[must_use]
    pub fn favorites(&self) -> &[Favorite] {
        &self.data.favorites
    }

    /// Record `entry` now
    pub fn record(&mut self, entry: HistoryEntry) {
        self.record_at(entry, now_millis());
    }

    /// Record `entry` with an explicit timestamp, dropping the oldest past the cap
    pub fn record_at(&mut self, entry: HistoryEntry, timestamp: i64) {
        self.data.history.insert(0, StoredEntry { entry, timestamp });
        self.data.history.truncate(self.max_history);
    }

    /// Pin `entry`; returns the new id, or `None` when its code is already pinned
    pub fn add_favorite(&mut self, entry: HistoryEntry) -> Option<i64> {
        self.add_favorite_at(entry, now_millis())
    }

    /// Pin `entry` with an explicit timestamp
    pub fn add_favorite_at(&mut self, entry: HistoryEntry, timestamp: i64) -> Option<i64> {
        if self.data.favorites.iter().any(|f| f.entry.code == entry.code) {
            return None;
        }
        let mut id = timestamp;
        while self.data.favorites.iter().any(|f| f.id == id) {
            id += 1;
        }
        self.data.favorites.insert(
            0,
            Favorite {
                id,
                entry,
                timestamp,
            },
        );
        Some(id)
    }

    /// Unpin by id; returns whether anything was removed
    pub fn remove_favorite(&mut self, id: i64) -> bool {
        let before = self.data.favorites.len();
        self.data.favorites.retain(|f| f.id != id);
        self.data.favorites.len() != before
    }

    /// Forget all history (favorites are kept)
    pub fn clear(&mut self) {
        self.data.history.clear();
    }

    /// Write the store back, creating parent directories as needed
    pub fn save(&self) -> CliResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "history store saved");
        Ok(())
    }
}
