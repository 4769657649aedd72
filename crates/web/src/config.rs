use anyhow::{Context, Result};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration for the league scoring API, read from the
/// environment (main loads a local .env first via dotenvy).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Comma-separated bearer keys for the mutating routes. Empty means no
    /// key is accepted and those routes are effectively disabled.
    pub api_keys: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT must be a number")?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
        })
    }
}
