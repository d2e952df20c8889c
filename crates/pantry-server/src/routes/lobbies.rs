use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use pantry_core::lobby::CreateLobby;
use pantry_core::{DietaryInfo, Lobby, LobbySummary};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{to_error, ApiError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/lobbies", post(create_lobby))
        .route("/lobbies/{id}", get(get_lobby))
        .route("/submit-dietary-info/{lobby_id}", post(submit_dietary_info))
        .route("/list-users", get(list_users))
        .route("/get-user-preferences", get(user_preferences))
}

#[derive(Deserialize)]
struct UserQuery {
    #[serde(default)]
    name: String,
}

async fn create_lobby(
    State(state): State<AppState>,
    Json(input): Json<CreateLobby>,
) -> Result<(StatusCode, Json<Lobby>), ApiError> {
    state
        .service
        .create_lobby(input)
        .await
        .map(|lobby| (StatusCode::CREATED, Json(lobby)))
        .map_err(to_error)
}

async fn get_lobby(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LobbySummary>, ApiError> {
    state.service.get_lobby(&id).await.map(Json).map_err(to_error)
}

async fn submit_dietary_info(
    State(state): State<AppState>,
    Path(lobby_id): Path<String>,
    Json(info): Json<DietaryInfo>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    state
        .service
        .submit_dietary_info(&lobby_id, info)
        .await
        .map(|entry| {
            (
                StatusCode::CREATED,
                Json(json!({ "message": "Dietary information submitted", "entry": entry })),
            )
        })
        .map_err(to_error)
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state
        .service
        .list_users()
        .await
        .map(|users| Json(json!({ "users": users })))
        .map_err(to_error)
}

async fn user_preferences(
    State(state): State<AppState>,
    Query(q): Query<UserQuery>,
) -> Result<Json<DietaryInfo>, ApiError> {
    state
        .service
        .user_preferences(&q.name)
        .await
        .map(Json)
        .map_err(to_error)
}
