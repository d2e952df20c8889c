use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use pantry_core::RecipeSearch;
use serde::Deserialize;
use serde_json::Value;

use super::{to_error, ApiError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/recipes/getRecipesFromIngredients",
            get(recipes_from_ingredients),
        )
        .route(
            "/recipes/getRecipesFromIngredientsForRecommendations",
            get(recommendations),
        )
        .route("/recipes/getBulkRecipeInformation", get(bulk_information))
        .route("/recipes/getRecipeInformation/{id}", get(recipe_information))
        .route("/recipes/getRecipeById", get(cached_recipe))
        .route("/recipes/searchRecipe", get(search_recipe))
}

#[derive(Deserialize)]
struct IngredientsQuery {
    #[serde(default)]
    ingredients: String,
}

#[derive(Deserialize)]
struct IdsQuery {
    #[serde(default)]
    ids: String,
}

#[derive(Deserialize)]
struct IdQuery {
    id: u64,
}

async fn recipes_from_ingredients(
    State(state): State<AppState>,
    Query(q): Query<IngredientsQuery>,
) -> Result<Json<Value>, ApiError> {
    state
        .service
        .ingredients_search(&q.ingredients)
        .await
        .map(Json)
        .map_err(to_error)
}

async fn recommendations(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state
        .service
        .recommendations()
        .await
        .map(Json)
        .map_err(to_error)
}

async fn bulk_information(
    State(state): State<AppState>,
    Query(q): Query<IdsQuery>,
) -> Result<Json<Value>, ApiError> {
    state
        .service
        .information_bulk(&q.ids)
        .await
        .map(Json)
        .map_err(to_error)
}

async fn recipe_information(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state
        .service
        .recipe_information(id)
        .await
        .map(Json)
        .map_err(to_error)
}

async fn cached_recipe(
    State(state): State<AppState>,
    Query(q): Query<IdQuery>,
) -> Result<Json<Value>, ApiError> {
    state
        .service
        .cached_recipe(q.id)
        .await
        .map(Json)
        .map_err(to_error)
}

async fn search_recipe(
    State(state): State<AppState>,
    Query(search): Query<RecipeSearch>,
) -> Result<Json<Value>, ApiError> {
    state
        .service
        .search_recipe(&search)
        .await
        .map(Json)
        .map_err(to_error)
}
