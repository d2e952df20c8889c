use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::{Path as UrlPath, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use pantry_service::{KitchenService, SpoonacularClient};
use pantry_store::{open_store, StoreConfig};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const TEST_API_KEY: &str = "test-key";

type Params = Query<HashMap<String, String>>;
type FakeResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn check_key(q: &HashMap<String, String>) -> Result<(), (StatusCode, Json<Value>)> {
    if q.get("apiKey").map(String::as_str) == Some(TEST_API_KEY) {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"status": "failure", "code": 401, "message": "You are not authorized."})),
        ))
    }
}

/// Canned stand-in for the Spoonacular endpoints the service calls.
pub fn fake_recipe_api() -> Router {
    async fn find_by_ingredients(Query(q): Params) -> FakeResult {
        check_key(&q)?;
        let ingredients = q.get("ingredients").cloned().unwrap_or_default();
        let number: usize = q.get("number").and_then(|n| n.parse().ok()).unwrap_or(0);
        let recipes: Vec<Value> = (1..=number.min(2))
            .map(|i| json!({ "id": i, "title": format!("{ingredients} dish {i}"), "usedIngredientCount": 1 }))
            .collect();
        Ok(Json(json!(recipes)))
    }

    async fn complex_search(Query(q): Params) -> FakeResult {
        check_key(&q)?;
        let query = q.get("query").cloned().unwrap_or_default();
        Ok(Json(json!({
            "results": [
                { "id": 715538, "title": format!("{query} bowl"), "cuisines": [q.get("cuisine")] },
                { "id": 716429, "title": format!("{query} bake"), "diets": [q.get("diet")] },
            ],
            "offset": 0,
            "number": q.get("number"),
            "totalResults": 2,
        })))
    }

    async fn information(UrlPath(id): UrlPath<u64>, Query(q): Params) -> FakeResult {
        check_key(&q)?;
        if id == 0 {
            return Err((
                StatusCode::NOT_FOUND,
                Json(json!({"status": "failure", "code": 404, "message": "A recipe with the id 0 does not exist."})),
            ));
        }
        Ok(Json(json!({ "id": id, "title": "Garlicky Kale", "servings": 2 })))
    }

    async fn information_bulk(Query(q): Params) -> FakeResult {
        check_key(&q)?;
        let recipes: Vec<Value> = q
            .get("ids")
            .map(String::as_str)
            .unwrap_or_default()
            .split(',')
            .map(|id| json!({ "id": id.parse::<u64>().unwrap_or(0), "dishTypes": ["lunch"] }))
            .collect();
        Ok(Json(json!(recipes)))
    }

    Router::new()
        .route("/recipes/findByIngredients", get(find_by_ingredients))
        .route("/recipes/complexSearch", get(complex_search))
        .route("/recipes/informationBulk", get(information_bulk))
        .route("/recipes/{id}/information", get(information))
}

async fn spawn(app: Router) -> (String, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), handle)
}

/// Service over `data_dir`, talking to the recipe API at `recipe_api_url`.
pub fn test_service(data_dir: &Path, recipe_api_url: &str, api_key: Option<&str>) -> KitchenService {
    let store = open_store(&StoreConfig::in_dir(data_dir)).unwrap();
    let provider = SpoonacularClient::new(recipe_api_url, api_key.map(String::from));
    KitchenService::new(store, Arc::new(provider))
}

/// Router over a fresh temp data dir. No recipe API is configured.
pub fn test_router() -> (Router, PathBuf) {
    let data_dir = tempfile::tempdir().unwrap().keep();
    let service = test_service(&data_dir, "http://127.0.0.1:9", None);
    (crate::build_router(service), data_dir)
}

/// A running test server with base_url and background task handles.
pub struct TestServer {
    pub base_url: String,
    pub data_dir: PathBuf,
    _handles: Vec<tokio::task::JoinHandle<()>>,
}

/// Spawn the fake recipe API and a pantry server wired to it, both on
/// random ports.
pub async fn spawn_test_server() -> TestServer {
    let (api_url, api_handle) = spawn(fake_recipe_api()).await;
    let data_dir = tempfile::tempdir().unwrap().keep();
    let service = test_service(&data_dir, &api_url, Some(TEST_API_KEY));
    let (base_url, handle) = spawn(crate::build_router(service)).await;
    TestServer {
        base_url,
        data_dir,
        _handles: vec![api_handle, handle],
    }
}
