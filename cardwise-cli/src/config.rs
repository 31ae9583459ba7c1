//! Process-level config loaded from environment variables.

use anyhow::Result;
use std::env;

/// Settings owned by the binary itself; the LLM, embedding, and index
/// configs are loaded by their own crates.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address for the HTTP server.
    pub addr: String,
    /// JSON file the session store persists to.
    pub sessions_file: String,
    pub log_file: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let addr = env::var("CARDWISE_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let sessions_file =
            env::var("SESSIONS_FILE").unwrap_or_else(|_| "sessions.json".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/cardwise.log".to_string());
        Ok(Self {
            addr,
            sessions_file,
            log_file,
        })
    }
}
