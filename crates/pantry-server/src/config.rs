use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use pantry_service::DEFAULT_BASE_URL;
use pantry_store::StoreConfig;

#[derive(Debug, Parser)]
#[command(name = "pantry-server", about = "Recipe search, fridge and lobby backend")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "PANTRY_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Port to listen on
    #[arg(long, env = "PANTRY_PORT", default_value = "5000")]
    pub port: u16,

    /// Directory for the fridge, lobby and recipe files
    #[arg(long, env = "PANTRY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Spoonacular API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the recipe API
    #[arg(long, env = "PANTRY_RECIPE_API_URL", default_value = DEFAULT_BASE_URL)]
    pub recipe_api_url: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind
            .parse()
            .with_context(|| format!("invalid bind address {:?}", self.bind))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            data_dir: self.data_dir.clone(),
        }
    }
}
