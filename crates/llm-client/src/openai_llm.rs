//! OpenAI-compatible implementation of [`LlmClient`], wrapping async-openai.

use std::sync::Arc;

use anyhow::Result;
use async_openai::{
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::instrument;

use super::{mask_token, LlmClient};

/// Chat completion client for OpenAI-compatible endpoints.
/// Holds the async-openai client, the model name, and the API key for masked logging.
#[derive(Clone)]
pub struct OpenAIChatClient {
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    model: String,
    /// API key stored only for logging (masked).
    api_key_for_logging: Option<String>,
}

impl OpenAIChatClient {
    /// Builds a client using the given API key and the default API base URL.
    pub fn new(api_key: String) -> Self {
        let api_key_for_logging = Some(api_key.clone());
        let config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: "gpt-4o-mini".to_string(),
            api_key_for_logging,
        }
    }

    /// Builds a client with a custom base URL (proxies or compatible endpoints).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let api_key_for_logging = Some(api_key.clone());
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: "gpt-4o-mini".to_string(),
            api_key_for_logging,
        }
    }

    /// Sets a different chat model.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Returns the chat model name (for tests and diagnostics).
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for OpenAIChatClient {
    #[instrument(skip(self, prompt))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let masked = self
            .api_key_for_logging
            .as_deref()
            .map(mask_token)
            .unwrap_or_else(|| "***".to_string());

        tracing::info!(
            model = %self.model,
            prompt_chars = prompt.len(),
            api_key = %masked,
            "chat completion request"
        );

        let messages: Vec<ChatCompletionRequestMessage> =
            vec![ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.to_string())
                .build()?
                .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "chat completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref usage) = response.usage {
            tracing::info!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion usage"
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("chat completion returned no choices"))
    }
}
