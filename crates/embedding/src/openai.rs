//! OpenAI implementation of [`EmbeddingService`].
//!
//! Uses OpenAI's embedding models (e.g. `text-embedding-3-small`) via
//! async-openai, with optional custom base URL for compatible endpoints.
//! Requests run under a bounded timeout; expiry surfaces as an error.

use std::time::Duration;

use async_openai::{types::CreateEmbeddingRequestArgs, Client};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::EmbeddingService;

/// Timeout for a single embedding request.
const EMBED_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for a batch request (larger payload).
const EMBED_BATCH_TIMEOUT: Duration = Duration::from_secs(60);

/// OpenAI embedding service implementation. Holds the async-openai client and model name.
#[derive(Debug, Clone)]
pub struct OpenAIEmbedding {
    client: Client<async_openai::config::OpenAIConfig>,
    /// Embedding model name (e.g. "text-embedding-3-small").
    model: String,
}

impl OpenAIEmbedding {
    /// Creates a new OpenAI embedding service.
    ///
    /// If `api_key` is empty, falls back to the OPENAI_API_KEY environment variable.
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_base_url(api_key, model, None)
    }

    /// Creates a new OpenAI embedding service with an optional base URL for
    /// OpenAI-compatible endpoints.
    pub fn new_with_base_url(api_key: String, model: String, base_url: Option<&str>) -> Self {
        let api_key = if api_key.is_empty() {
            std::env::var("OPENAI_API_KEY").unwrap_or_default()
        } else {
            api_key
        };

        let mut openai_config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        if let Some(url) = base_url.filter(|s| !s.is_empty()) {
            openai_config = openai_config.with_api_base(url);
        }
        let client = Client::with_config(openai_config);

        Self { client, model }
    }

    /// Creates a new OpenAI embedding service with the default model
    /// (`text-embedding-3-small`).
    pub fn with_api_key(api_key: String) -> Self {
        Self::new(api_key, "text-embedding-3-small".to_string())
    }

    /// Sets a different embedding model.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Returns the embedding model name (for tests and diagnostics).
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl EmbeddingService for OpenAIEmbedding {
    /// Generates an embedding for one text string.
    ///
    /// The API returns the vector wrapped in a one-element data array; this
    /// method unwraps it and errors if the array is empty.
    #[instrument(skip(self, text))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(self.model.clone())
            .input(vec![text])
            .build()?;

        let embeddings = self.client.embeddings();
        let response = match tokio::time::timeout(EMBED_TIMEOUT, embeddings.create(request)).await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!(error = %e, "embedding request failed");
                return Err(e.into());
            }
            Err(_) => {
                warn!(timeout_secs = EMBED_TIMEOUT.as_secs(), "embedding request timed out");
                return Err(anyhow::anyhow!(
                    "embedding request timed out after {} seconds",
                    EMBED_TIMEOUT.as_secs()
                ));
            }
        };

        let first = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("embedding response contained no data"))?;

        debug!(
            model = %self.model,
            dimension = first.embedding.len(),
            "generated embedding"
        );

        Ok(first.embedding)
    }

    #[instrument(skip(self, texts), fields(model = %self.model, batch_size = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let inputs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        let request = CreateEmbeddingRequestArgs::default()
            .model(self.model.clone())
            .input(inputs)
            .build()?;

        let embeddings = self.client.embeddings();
        let response =
            match tokio::time::timeout(EMBED_BATCH_TIMEOUT, embeddings.create(request)).await {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    warn!(error = %e, "embedding batch request failed");
                    return Err(e.into());
                }
                Err(_) => {
                    warn!(
                        timeout_secs = EMBED_BATCH_TIMEOUT.as_secs(),
                        "embedding batch request timed out"
                    );
                    return Err(anyhow::anyhow!(
                        "embedding batch request timed out after {} seconds",
                        EMBED_BATCH_TIMEOUT.as_secs()
                    ));
                }
            };

        // The API does not guarantee response order; sort by index.
        let mut data = response.data;
        data.sort_by_key(|d| d.index);

        if data.len() != texts.len() {
            anyhow::bail!(
                "embedding batch returned {} vectors for {} inputs",
                data.len(),
                texts.len()
            );
        }

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}
