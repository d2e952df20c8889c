use async_trait::async_trait;
use pantry_core::recipe::COMPLEX_SEARCH_RESULTS;
use pantry_core::RecipeSearch;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::{RecipeProvider, ServiceError};

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

/// Async client for the Spoonacular recipe API.
pub struct SpoonacularClient {
    base_url: String,
    client: Client,
    api_key: Option<String>,
}

impl SpoonacularClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ServiceError::Internal("recipe API key not configured".into()))?;

        debug!("GET {path}");
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .query(&[("apiKey", api_key)])
            .query(params)
            .send()
            .await
            .map_err(|e| ServiceError::Internal(format!("recipe API request failed: {e}")))?;
        handle_response(resp).await
    }
}

async fn handle_response(resp: reqwest::Response) -> Result<Value, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        resp.json::<Value>()
            .await
            .map_err(|e| ServiceError::Internal(format!("json decode: {e}")))
    } else {
        Err(parse_error_with_status(status, resp).await)
    }
}

async fn parse_error_with_status(status: StatusCode, resp: reqwest::Response) -> ServiceError {
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| {
            v["message"]
                .as_str()
                .or_else(|| v["error"].as_str())
                .map(String::from)
        })
        .unwrap_or(body);

    match status {
        StatusCode::NOT_FOUND => ServiceError::NotFound(message),
        StatusCode::BAD_REQUEST => ServiceError::InvalidInput(message),
        _ => ServiceError::Upstream {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl RecipeProvider for SpoonacularClient {
    async fn find_by_ingredients(
        &self,
        ingredients: &str,
        number: u32,
    ) -> Result<Value, ServiceError> {
        self.get_json(
            "/recipes/findByIngredients",
            &[
                ("ingredients", ingredients.to_string()),
                ("number", number.to_string()),
                ("ranking", "2".into()),
                ("ignorePantry", "true".into()),
            ],
        )
        .await
    }

    async fn complex_search(&self, search: &RecipeSearch) -> Result<Value, ServiceError> {
        self.get_json(
            "/recipes/complexSearch",
            &[
                ("query", search.recipe.clone()),
                ("cuisine", search.cuisine.clone()),
                ("diet", search.diet.clone()),
                ("intolerances", search.intolerance_list()),
                ("type", search.recipe_type.clone()),
                ("instructionsRequired", "true".into()),
                ("fillIngredients", "true".into()),
                ("addRecipeInformation", "true".into()),
                ("addRecipeInstructions", "true".into()),
                ("addRecipeNutrition", "true".into()),
                ("number", COMPLEX_SEARCH_RESULTS.to_string()),
            ],
        )
        .await
    }

    async fn recipe_information(&self, id: u64) -> Result<Value, ServiceError> {
        self.get_json(&format!("/recipes/{id}/information"), &[])
            .await
    }

    async fn information_bulk(&self, ids: &[u64]) -> Result<Value, ServiceError> {
        let ids = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.get_json("/recipes/informationBulk", &[("ids", ids)])
            .await
    }
}
