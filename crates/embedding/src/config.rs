//! Embedding configuration loaded from environment variables.

use anyhow::Result;
use std::env;

/// Embedding config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvEmbeddingConfig {
    pub openai_api_key: String,
    /// Optional base URL for OpenAI-compatible embedding endpoints (OPENAI_BASE_URL).
    pub openai_base_url: Option<String>,
    pub embedding_model: String,
}

impl EnvEmbeddingConfig {
    /// Load from environment variables: OPENAI_API_KEY, OPENAI_BASE_URL
    /// (optional), EMBEDDING_MODEL (default "text-embedding-3-small").
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let embedding_model =
            env::var("EMBEDDING_MODEL").unwrap_or_else(|_| "text-embedding-3-small".to_string());
        Ok(Self {
            openai_api_key,
            openai_base_url,
            embedding_model,
        })
    }

    /// Validate config: the OpenAI embedding service requires an API key.
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.is_empty() {
            anyhow::bail!("OPENAI_API_KEY must be set for the embedding service");
        }
        Ok(())
    }

    /// Builds an [`crate::OpenAIEmbedding`] service from this config.
    pub fn build_service(&self) -> crate::OpenAIEmbedding {
        crate::OpenAIEmbedding::new_with_base_url(
            self.openai_api_key.clone(),
            self.embedding_model.clone(),
            self.openai_base_url.as_deref(),
        )
    }
}
