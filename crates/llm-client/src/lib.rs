//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and an OpenAI-compatible implementation.
//! Transport-agnostic; used by the extraction, chat, reason, and reward
//! components, which all consume the model as "prompt in, text out".
//!
//! The trait is intentionally minimal so that tests can provide scripted
//! implementations without touching the network.

use anyhow::Result;
use async_trait::async_trait;

mod config;
mod openai_llm;

pub use config::EnvLlmConfig;
pub use openai_llm::OpenAIChatClient;

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 {
        "***".to_string()
    } else {
        let head_len = 7.min(len);
        let tail_len = 4.min(len.saturating_sub(head_len));
        let head = &token[..head_len];
        let tail = if tail_len > 0 {
            &token[len - tail_len..]
        } else {
            ""
        };
        format!("{}***{}", head, tail)
    }
}

/// Text completion interface: one prompt in, one reply out.
///
/// Implementations make a remote call and may fail; callers decide whether a
/// failure propagates or degrades to a fixed default.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply for the given prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
