use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub novu_api_key: String,
    pub novu_api_url: String,
    pub openai_api_key: String,
    pub openai_api_url: String,
    pub xata_api_key: String,
    pub xata_database_url: String,
    pub xata_branch: String,
    /// Shared secret expected verbatim in the `Authorization` header of `POST /`.
    pub security_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            novu_api_key: require_env("NOVU_API_KEY")?,
            novu_api_url: env_or("NOVU_API_URL", "https://api.novu.co"),
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_api_url: env_or("OPENAI_API_URL", "https://api.openai.com"),
            xata_api_key: require_env("XATA_API_KEY")?,
            xata_database_url: require_env("XATA_DATABASE_URL")?,
            xata_branch: env_or("XATA_BRANCH", "main"),
            security_key: require_env("SECURITY_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5151".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
