//! Application state
//!
//! Holds configuration and the shared components handed to handlers.

use crate::error::{Error, Result};
use crate::service::AppService;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database URL (SQLite file, auto-created on first use)
    pub database_url: String,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Directory with the static browser UI
    pub static_dir: String,
    /// Summarization provider base URL
    pub summarizer_api_url: String,
    /// Summarization provider model name
    pub summarizer_model: String,
    /// Required provider credential
    pub summarizer_api_key: String,
    /// Timeout imposed on each provider call
    pub summarizer_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Fails fast when the provider API key is absent; everything else
    /// has a default.
    pub fn from_env() -> Result<Self> {
        let summarizer_api_key = std::env::var("SUMMARIZER_API_KEY")
            .map_err(|_| Error::Config("SUMMARIZER_API_KEY is not set".to_string()))?;

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://summaries.db".to_string()),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            summarizer_api_url: std::env::var("SUMMARIZER_API_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com".to_string()
            }),
            summarizer_model: std::env::var("SUMMARIZER_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            summarizer_api_key,
            summarizer_timeout: Duration::from_secs(
                std::env::var("SUMMARIZER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(120),
            ),
        })
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database pool
    pub pool: SqlitePool,
    /// Application config
    pub config: AppConfig,
    /// Application service (extract -> summarize -> store)
    pub service: Arc<AppService>,
}
