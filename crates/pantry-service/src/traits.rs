use async_trait::async_trait;
use pantry_core::{PantryError, RecipeSearch};
use pantry_store::StoreError;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("recipe API returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// What an API client is told: the bare message, without the
    /// kind prefix of the `Display` form.
    pub fn client_message(&self) -> String {
        match self {
            ServiceError::NotFound(msg)
            | ServiceError::InvalidInput(msg)
            | ServiceError::Internal(msg) => msg.clone(),
            ServiceError::Upstream { .. } => self.to_string(),
        }
    }
}

impl From<PantryError> for ServiceError {
    fn from(e: PantryError) -> Self {
        match e {
            PantryError::NotFound(msg) => ServiceError::NotFound(msg),
            PantryError::InvalidInput(msg) => ServiceError::InvalidInput(msg),
            PantryError::Storage(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        PantryError::from(e).into()
    }
}

/// The third-party recipe API. Responses are passed through untouched.
///
/// `SpoonacularClient` talks to the real service; tests plug in fakes.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    async fn find_by_ingredients(&self, ingredients: &str, number: u32)
        -> Result<Value, ServiceError>;
    async fn complex_search(&self, search: &RecipeSearch) -> Result<Value, ServiceError>;
    async fn recipe_information(&self, id: u64) -> Result<Value, ServiceError>;
    async fn information_bulk(&self, ids: &[u64]) -> Result<Value, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_keep_their_kind() {
        let e: ServiceError = PantryError::InvalidInput("No ingredient provided".into()).into();
        assert_eq!(e.to_string(), "invalid input: No ingredient provided");

        let e: ServiceError = StoreError::Malformed {
            key: "fridge.csv".into(),
            reason: "bad".into(),
        }
        .into();
        assert!(matches!(e, ServiceError::Internal(_)));
    }

    #[test]
    fn client_message_drops_kind_prefix() {
        let e = ServiceError::InvalidInput("No ingredients provided".into());
        assert_eq!(e.client_message(), "No ingredients provided");

        let e = ServiceError::Internal("recipe API key not configured".into());
        assert_eq!(e.client_message(), "recipe API key not configured");

        let e = ServiceError::Upstream {
            status: 401,
            message: "You are not authorized.".into(),
        };
        assert_eq!(e.client_message(), "recipe API returned 401: You are not authorized.");
    }

    #[test]
    fn upstream_display_includes_status() {
        let e = ServiceError::Upstream {
            status: 402,
            message: "daily quota used".into(),
        };
        assert_eq!(e.to_string(), "recipe API returned 402: daily quota used");
    }
}
