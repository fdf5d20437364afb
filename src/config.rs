use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_MODEL_ID: &str = "ai21.j2-ultra-v1";
pub const API_KEY_VAR: &str = "AWS_BEARER_TOKEN_BEDROCK";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub region: String,
    pub model_id: String,
    pub bedrock_endpoint: String,
    pub bedrock_api_key: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bedrock_api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::ConfigError(format!("{} is not set", API_KEY_VAR)))?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let region = lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());
        let model_id = lookup("MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());
        let bedrock_endpoint = lookup("BEDROCK_ENDPOINT")
            .unwrap_or_else(|| format!("https://bedrock-runtime.{}.amazonaws.com", region));

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            region,
            model_id,
            bedrock_endpoint,
            bedrock_api_key,
        })
    }
}
