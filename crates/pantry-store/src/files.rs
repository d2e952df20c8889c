//! Typed views over the flat files kept in the data directory.
//!
//! Each mutation reads the whole file, changes it in memory and writes it
//! back. Concurrent writers can lose updates.

use std::sync::Arc;

use bytes::Bytes;
use pantry_core::lobby::{Lobby, LobbyEntry};
use pantry_core::{FlyerItem, FridgeItem, Groceries};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    FlatFileStore, StoreError, FRIDGE_KEY, GROCERIES_KEY, LOBBIES_KEY, LOBBY_ENTRIES_KEY,
    RECIPE_CACHE_KEY,
};

const FRIDGE_HEADER: [&str; 3] = ["name", "quantity", "imageUrl"];

async fn load_json<T: DeserializeOwned + Default>(
    store: &dyn FlatFileStore,
    key: &str,
) -> Result<T, StoreError> {
    match store.read(key).await? {
        Some(data) => serde_json::from_slice(&data).map_err(|e| StoreError::Malformed {
            key: key.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(T::default()),
    }
}

async fn save_json<T: Serialize + ?Sized>(
    store: &dyn FlatFileStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let data = serde_json::to_vec_pretty(value).map_err(|e| StoreError::Encode {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.write(key, Bytes::from(data)).await
}

/// The fridge, stored as CSV with a `name,quantity,imageUrl` header.
#[derive(Clone)]
pub struct FridgeFile {
    store: Arc<dyn FlatFileStore>,
}

impl FridgeFile {
    pub fn new(store: Arc<dyn FlatFileStore>) -> Self {
        Self { store }
    }

    /// A missing file is an empty fridge. A file without the header is the
    /// older one-ingredient-per-line format: each line is a whole name with
    /// quantity 1.
    pub async fn load(&self) -> Result<Vec<FridgeItem>, StoreError> {
        match self.store.read(FRIDGE_KEY).await? {
            Some(data) => parse_fridge(&data),
            None => Ok(Vec::new()),
        }
    }

    pub async fn save(&self, items: &[FridgeItem]) -> Result<(), StoreError> {
        let data = encode_fridge(items)?;
        debug!("writing {} fridge items", items.len());
        self.store.write(FRIDGE_KEY, Bytes::from(data)).await
    }
}

fn parse_fridge(data: &[u8]) -> Result<Vec<FridgeItem>, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    match reader.headers() {
        Ok(header) if header.iter().eq(FRIDGE_HEADER) => {}
        _ => return Ok(parse_name_lines(data)),
    }

    let mut items = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| StoreError::Malformed {
            key: FRIDGE_KEY.to_string(),
            reason: e.to_string(),
        })?;
        let name = record.get(0).unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        let quantity = record
            .get(1)
            .and_then(|q| q.parse().ok())
            .unwrap_or(1);
        items.push(FridgeItem {
            name: name.to_string(),
            quantity,
            image_url: record.get(2).unwrap_or_default().to_string(),
        });
    }
    Ok(items)
}

fn parse_name_lines(data: &[u8]) -> Vec<FridgeItem> {
    String::from_utf8_lossy(data)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(FridgeItem::named)
        .collect()
}

fn encode_fridge(items: &[FridgeItem]) -> Result<Vec<u8>, StoreError> {
    let encode = |e: &dyn std::fmt::Display| StoreError::Encode {
        key: FRIDGE_KEY.to_string(),
        reason: e.to_string(),
    };
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(FRIDGE_HEADER).map_err(|e| encode(&e))?;
    for item in items {
        writer
            .write_record([
                item.name.as_str(),
                &item.quantity.to_string(),
                item.image_url.as_str(),
            ])
            .map_err(|e| encode(&e))?;
    }
    writer.into_inner().map_err(|e| encode(&e))
}

/// Raw response of the last recipe search.
#[derive(Clone)]
pub struct RecipeCacheFile {
    store: Arc<dyn FlatFileStore>,
}

impl RecipeCacheFile {
    pub fn new(store: Arc<dyn FlatFileStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Result<Option<Value>, StoreError> {
        load_json(self.store.as_ref(), RECIPE_CACHE_KEY).await
    }

    pub async fn save(&self, result: &Value) -> Result<(), StoreError> {
        save_json(self.store.as_ref(), RECIPE_CACHE_KEY, result).await
    }
}

/// Dietary submissions (a JSON array) plus the lobby definitions.
#[derive(Clone)]
pub struct LobbyFile {
    store: Arc<dyn FlatFileStore>,
}

impl LobbyFile {
    pub fn new(store: Arc<dyn FlatFileStore>) -> Self {
        Self { store }
    }

    pub async fn entries(&self) -> Result<Vec<LobbyEntry>, StoreError> {
        load_json(self.store.as_ref(), LOBBY_ENTRIES_KEY).await
    }

    pub async fn append(&self, entry: LobbyEntry) -> Result<(), StoreError> {
        let mut entries = self.entries().await?;
        entries.push(entry);
        save_json(self.store.as_ref(), LOBBY_ENTRIES_KEY, &entries).await
    }

    pub async fn lobbies(&self) -> Result<Vec<Lobby>, StoreError> {
        load_json(self.store.as_ref(), LOBBIES_KEY).await
    }

    pub async fn add_lobby(&self, lobby: Lobby) -> Result<(), StoreError> {
        let mut lobbies = self.lobbies().await?;
        lobbies.push(lobby);
        save_json(self.store.as_ref(), LOBBIES_KEY, &lobbies).await
    }

    pub async fn find_lobby(&self, id: &str) -> Result<Option<Lobby>, StoreError> {
        Ok(self.lobbies().await?.into_iter().find(|l| l.id == id))
    }
}

/// Discounted flyer items per store, written by the flyer parser.
#[derive(Clone)]
pub struct GroceriesFile {
    store: Arc<dyn FlatFileStore>,
}

impl GroceriesFile {
    pub fn new(store: Arc<dyn FlatFileStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Result<Groceries, StoreError> {
        load_json(self.store.as_ref(), GROCERIES_KEY).await
    }

    /// Replace the item list of one store, keeping the others.
    pub async fn merge(&self, store_name: &str, items: Vec<FlyerItem>) -> Result<Groceries, StoreError> {
        let mut groceries = self.load().await?;
        groceries.insert(store_name.to_string(), items);
        save_json(self.store.as_ref(), GROCERIES_KEY, &groceries).await?;
        Ok(groceries)
    }
}
