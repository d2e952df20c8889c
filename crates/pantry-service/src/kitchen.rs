use std::sync::Arc;

use chrono::Utc;
use pantry_core::fridge;
use pantry_core::lobby::{self, CreateLobby};
use pantry_core::recipe::{self, INGREDIENT_SEARCH_RESULTS, RECOMMENDATION_RESULTS};
use pantry_core::{
    DietaryInfo, FridgeItem, Groceries, Lobby, LobbyEntry, LobbySummary, RecipeSearch,
};
use pantry_store::{FlatFileStore, FridgeFile, GroceriesFile, LobbyFile, RecipeCacheFile};
use rand::Rng;
use serde_json::{json, Value};
use tracing::info;

use crate::{RecipeProvider, ServiceError};

const LOBBY_ID_LEN: usize = 13;

/// Everything the HTTP routes need: the recipe API plus the flat files.
pub struct KitchenService {
    provider: Arc<dyn RecipeProvider>,
    fridge: FridgeFile,
    recipe_cache: RecipeCacheFile,
    lobbies: LobbyFile,
    groceries: GroceriesFile,
}

impl KitchenService {
    pub fn new(store: Arc<dyn FlatFileStore>, provider: Arc<dyn RecipeProvider>) -> Self {
        Self {
            provider,
            fridge: FridgeFile::new(store.clone()),
            recipe_cache: RecipeCacheFile::new(store.clone()),
            lobbies: LobbyFile::new(store.clone()),
            groceries: GroceriesFile::new(store),
        }
    }

    // -- Recipes --

    pub async fn ingredients_search(&self, ingredients: &str) -> Result<Value, ServiceError> {
        let ingredients = ingredients.trim();
        if ingredients.is_empty() {
            return Err(ServiceError::InvalidInput("No ingredients provided".into()));
        }
        self.provider
            .find_by_ingredients(ingredients, INGREDIENT_SEARCH_RESULTS)
            .await
    }

    /// Recipes for whatever is in the fridge. An empty fridge yields an
    /// empty list without a round trip to the recipe API.
    pub async fn recommendations(&self) -> Result<Value, ServiceError> {
        let items = self.fridge.load().await?;
        if items.is_empty() {
            return Ok(json!([]));
        }
        self.provider
            .find_by_ingredients(&fridge::ingredient_query(&items), RECOMMENDATION_RESULTS)
            .await
    }

    /// Run a complex search and keep the raw result as the last search.
    pub async fn search_recipe(&self, search: &RecipeSearch) -> Result<Value, ServiceError> {
        let result = self.provider.complex_search(search).await?;
        self.recipe_cache.save(&result).await?;
        Ok(result)
    }

    /// Look a recipe up in the last search result.
    pub async fn cached_recipe(&self, id: u64) -> Result<Value, ServiceError> {
        let cached = self.recipe_cache.load().await?;
        cached
            .as_ref()
            .and_then(|v| v["results"].as_array())
            .and_then(|results| results.iter().find(|r| r["id"].as_u64() == Some(id)))
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("recipe {id} not in last search")))
    }

    pub async fn recipe_information(&self, id: u64) -> Result<Value, ServiceError> {
        self.provider.recipe_information(id).await
    }

    pub async fn information_bulk(&self, ids: &str) -> Result<Value, ServiceError> {
        let ids = recipe::parse_ids(ids);
        if ids.is_empty() {
            return Err(ServiceError::InvalidInput("No recipe ids provided".into()));
        }
        self.provider.information_bulk(&ids).await
    }

    // -- Fridge --

    pub async fn list_fridge(&self) -> Result<Vec<FridgeItem>, ServiceError> {
        Ok(self.fridge.load().await?)
    }

    pub async fn fridge_names(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self
            .fridge
            .load()
            .await?
            .into_iter()
            .map(|item| item.name)
            .collect())
    }

    pub async fn add_fridge_item(&self, item: FridgeItem) -> Result<Vec<FridgeItem>, ServiceError> {
        let mut items = self.fridge.load().await?;
        fridge::add_item(&mut items, item)?;
        self.fridge.save(&items).await?;
        Ok(items)
    }

    pub async fn add_ingredient(&self, name: &str) -> Result<Vec<FridgeItem>, ServiceError> {
        let mut items = self.fridge.load().await?;
        if fridge::add_name(&mut items, name)? {
            self.fridge.save(&items).await?;
        }
        Ok(items)
    }

    pub async fn delete_ingredient(&self, name: &str) -> Result<Vec<FridgeItem>, ServiceError> {
        let mut items = self.fridge.load().await?;
        let removed = fridge::remove_item(&mut items, name)?;
        self.fridge.save(&items).await?;
        info!("removed {} from fridge", removed.name);
        Ok(items)
    }

    // -- Lobbies --

    pub async fn create_lobby(&self, input: CreateLobby) -> Result<Lobby, ServiceError> {
        let lobby = input.into_lobby(generate_lobby_id())?;
        self.lobbies.add_lobby(lobby.clone()).await?;
        info!("created lobby {} ({})", lobby.id, lobby.name);
        Ok(lobby)
    }

    pub async fn get_lobby(&self, id: &str) -> Result<LobbySummary, ServiceError> {
        let lobby = self.lobbies.find_lobby(id).await?;
        let entries = self.lobbies.entries().await?;
        let summary = LobbySummary::collect(id, lobby, &entries);
        if summary.is_empty() {
            return Err(ServiceError::NotFound(format!("lobby {id}")));
        }
        Ok(summary)
    }

    /// Submissions are accepted for any lobby id; lobbies created in the
    /// browser never reach the server.
    pub async fn submit_dietary_info(
        &self,
        lobby_id: &str,
        info: DietaryInfo,
    ) -> Result<LobbyEntry, ServiceError> {
        info.validate()?;
        let entry = LobbyEntry {
            lobby_id: lobby_id.to_string(),
            submitted_at: Utc::now(),
            info: DietaryInfo {
                name: info.name.trim().to_string(),
                email: info.email.trim().to_string(),
                ..info
            },
        };
        self.lobbies.append(entry.clone()).await?;
        Ok(entry)
    }

    pub async fn list_users(&self) -> Result<Vec<String>, ServiceError> {
        Ok(lobby::user_names(&self.lobbies.entries().await?))
    }

    pub async fn user_preferences(&self, name: &str) -> Result<DietaryInfo, ServiceError> {
        let entries = self.lobbies.entries().await?;
        lobby::latest_for(&entries, name.trim())
            .map(|entry| entry.info.clone())
            .ok_or_else(|| ServiceError::NotFound("User preferences not found".into()))
    }

    // -- Flyers --

    pub async fn groceries(&self) -> Result<Groceries, ServiceError> {
        Ok(self.groceries.load().await?)
    }
}

/// Random base-36 id, the same shape the lobby page generates client-side.
fn generate_lobby_id() -> String {
    const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..LOBBY_ID_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}
