pub mod flyers;
pub mod fridge;
pub mod health;
pub mod lobbies;
pub mod recipes;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header::CONTENT_TYPE, Method, StatusCode};
use axum::{Json, Router};
use pantry_service::{KitchenService, ServiceError};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, warn};

pub struct InnerAppState {
    pub service: KitchenService,
}

pub type AppState = Arc<InnerAppState>;

pub fn build_router(service: KitchenService) -> Router {
    let state = Arc::new(InnerAppState { service });

    // The frontend is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .merge(health::routes())
        .merge(recipes::routes())
        .merge(fridge::routes())
        .merge(lobbies::routes())
        .merge(flyers::routes())
        .layer(cors)
        .with_state(state)
}

pub(crate) type ApiError = (StatusCode, Json<Value>);

pub(crate) fn to_error(e: ServiceError) -> ApiError {
    let status = match &e {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ServiceError::Upstream { .. } => {
            warn!("{e}");
            StatusCode::BAD_GATEWAY
        }
        ServiceError::Internal(_) => {
            error!("{e}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": e.client_message() })))
}
