use axum::{extract::State, routing::get, Json, Router};
use pantry_core::Groceries;

use super::{to_error, ApiError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/recipes/groceries", get(groceries))
}

/// Flyer discounts per store, as last written by `pantry-flyer ocr`.
async fn groceries(State(state): State<AppState>) -> Result<Json<Groceries>, ApiError> {
    state.service.groceries().await.map(Json).map_err(to_error)
}
