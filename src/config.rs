//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup; there is no config reloading.

use std::env;
use std::path::PathBuf;

/// Default universe whose levels are listed by `/api/levels`.
const DEFAULT_UNIVERSE_ID: &str = "6742973974";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Roblox OAuth client ID (public)
    pub roblox_client_id: String,
    /// Roblox OAuth client secret
    pub roblox_client_secret: String,
    /// OAuth redirect URI registered with Roblox
    pub roblox_redirect_uri: String,
    /// Session signing key (raw bytes)
    pub session_signing_key: Vec<u8>,
    /// Universe ID whose games are exposed as levels
    pub universe_id: String,
    /// Path of the JSON store document
    pub data_file: PathBuf,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            roblox_client_id: env::var("ROBLOX_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("ROBLOX_CLIENT_ID"))?,
            roblox_client_secret: env::var("ROBLOX_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("ROBLOX_CLIENT_SECRET"))?,
            roblox_redirect_uri: env::var("ROBLOX_REDIRECT_URI")
                .map_err(|_| ConfigError::Missing("ROBLOX_REDIRECT_URI"))?,
            session_signing_key: env::var("SESSION_SECRET")
                .map_err(|_| ConfigError::Missing("SESSION_SECRET"))?
                .into_bytes(),
            universe_id: env::var("UNIVERSE_ID")
                .unwrap_or_else(|_| DEFAULT_UNIVERSE_ID.to_string()),
            data_file: env::var("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data.json")),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            roblox_client_id: "test_client_id".to_string(),
            roblox_client_secret: "test_secret".to_string(),
            roblox_redirect_uri: "http://localhost:3000/auth/callback".to_string(),
            session_signing_key: b"test_session_key_32_bytes_long!!".to_vec(),
            universe_id: DEFAULT_UNIVERSE_ID.to_string(),
            data_file: PathBuf::from("data.json"),
            port: 3000,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
