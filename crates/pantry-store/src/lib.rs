mod files;
mod local;

pub use files::{FridgeFile, GroceriesFile, LobbyFile, RecipeCacheFile};
pub use local::LocalStore;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot open data dir {}: {source}", .path.display())]
    DataDir { path: PathBuf, source: io::Error },

    #[error("cannot read {key}: {source}")]
    Read { key: String, source: io::Error },

    #[error("cannot write {key}: {source}")]
    Write { key: String, source: io::Error },

    #[error("malformed {key}: {reason}")]
    Malformed { key: String, reason: String },

    #[error("cannot encode {key}: {reason}")]
    Encode { key: String, reason: String },
}

impl From<StoreError> for pantry_core::PantryError {
    fn from(e: StoreError) -> Self {
        pantry_core::PantryError::Storage(e.to_string())
    }
}

/// The pantry's data files, keyed by file name.
///
/// Every write replaces the whole file. Nothing serialises concurrent
/// read-modify-write cycles, so two writers can lose an update.
#[async_trait]
pub trait FlatFileStore: Send + Sync {
    /// Contents of `key`. A missing file and a file holding only
    /// whitespace both read as `None`.
    async fn read(&self, key: &str) -> Result<Option<Bytes>, StoreError>;

    async fn write(&self, key: &str, data: Bytes) -> Result<(), StoreError>;
}

// -- Keys --

pub const FRIDGE_KEY: &str = "fridge.csv";
pub const RECIPE_CACHE_KEY: &str = "recipes.json";
pub const LOBBY_ENTRIES_KEY: &str = "lobby.json";
pub const LOBBIES_KEY: &str = "lobbies.json";
pub const GROCERIES_KEY: &str = "groceries.json";

// -- Configuration --

#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Directory holding the data files. `None` picks the user data dir.
    pub data_dir: Option<PathBuf>,
}

impl StoreConfig {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(dir.into()),
        }
    }

    /// The configured directory, else `$XDG_DATA_HOME/pantry`, else
    /// `~/.local/share/pantry`.
    pub fn resolved_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        let share = std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share")))
            .unwrap_or_else(|| PathBuf::from("."));
        share.join("pantry")
    }
}

/// Open the local data dir, creating it if needed.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn FlatFileStore>, StoreError> {
    Ok(Arc::new(LocalStore::open(config)?))
}
