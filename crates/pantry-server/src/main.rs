use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use pantry_server::config::ServerConfig;
use pantry_service::{KitchenService, SpoonacularClient};
use pantry_store::LocalStore;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    let addr = config.socket_addr()?;

    let store = LocalStore::open(&config.store_config())?;
    info!("data dir: {}", store.data_dir().display());

    if config.api_key.as_deref().unwrap_or_default().is_empty() {
        warn!("API_KEY not set, recipe routes will fail");
    }
    let provider = SpoonacularClient::new(&config.recipe_api_url, config.api_key.clone());
    let service = KitchenService::new(Arc::new(store), Arc::new(provider));

    let listener = TcpListener::bind(addr).await?;
    info!("pantry-server listening on http://{addr}");

    pantry_server::serve(listener, service).await
}
