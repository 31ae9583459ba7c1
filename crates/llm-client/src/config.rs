//! LLM configuration loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Chat model config for OpenAI-compatible APIs.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    /// Optional base URL for OpenAI-compatible endpoints (OPENAI_BASE_URL).
    pub openai_base_url: Option<String>,
    pub chat_model: String,
}

impl EnvLlmConfig {
    /// Load from environment variables: OPENAI_API_KEY (required),
    /// OPENAI_BASE_URL (optional), CHAT_MODEL (default "gpt-4o-mini").
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let chat_model = env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        Ok(Self {
            openai_api_key,
            openai_base_url,
            chat_model,
        })
    }

    /// Builds a client from this config, honoring the optional base URL.
    pub fn build_client(&self) -> super::OpenAIChatClient {
        let client = match self.openai_base_url.as_deref() {
            Some(url) => super::OpenAIChatClient::with_base_url(
                self.openai_api_key.clone(),
                url.to_string(),
            ),
            None => super::OpenAIChatClient::new(self.openai_api_key.clone()),
        };
        client.with_model(self.chat_model.clone())
    }
}
