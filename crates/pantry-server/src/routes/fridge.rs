use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use pantry_core::fridge::IngredientName;
use pantry_core::FridgeItem;
use serde_json::{json, Value};

use super::{to_error, ApiError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/getFridge", get(get_fridge))
        .route("/recipes/getRecipes", get(fridge_names))
        .route("/recipes/addFridgeItem", post(add_fridge_item))
        .route("/recipes/addIngredient", post(add_ingredient))
        .route("/recipes/deleteIngredient", post(delete_ingredient))
}

async fn get_fridge(State(state): State<AppState>) -> Result<Json<Vec<FridgeItem>>, ApiError> {
    state.service.list_fridge().await.map(Json).map_err(to_error)
}

/// Older clients only know ingredient names.
async fn fridge_names(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    state.service.fridge_names().await.map(Json).map_err(to_error)
}

async fn add_fridge_item(
    State(state): State<AppState>,
    Json(item): Json<FridgeItem>,
) -> Result<Json<Value>, ApiError> {
    state
        .service
        .add_fridge_item(item)
        .await
        .map(|fridge| Json(json!({ "message": "Ingredient added", "fridge": fridge })))
        .map_err(to_error)
}

async fn add_ingredient(
    State(state): State<AppState>,
    Json(body): Json<IngredientName>,
) -> Result<Json<Value>, ApiError> {
    state
        .service
        .add_ingredient(&body.ingredient)
        .await
        .map(|fridge| Json(json!({ "message": "Ingredient added", "fridge": fridge })))
        .map_err(to_error)
}

async fn delete_ingredient(
    State(state): State<AppState>,
    Json(body): Json<IngredientName>,
) -> Result<Json<Value>, ApiError> {
    state
        .service
        .delete_ingredient(&body.ingredient)
        .await
        .map(|fridge| Json(json!({ "message": "Ingredient removed", "fridge": fridge })))
        .map_err(to_error)
}
