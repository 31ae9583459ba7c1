//! Preference extraction: chat transcript in, structured [`Preferences`] out.
//!
//! One completion against a fixed schema-description prompt. Best-effort and
//! non-idempotent: re-running on a grown transcript may change earlier field
//! values, since the model is free to reinterpret prior answers.

use std::sync::Arc;

use llm_client::LlmClient;
use tracing::{debug, warn};

use crate::prompts::{extraction_prompt, render_transcript};
use crate::types::{Message, Preferences};

/// Extracts structured preferences from conversation history via the LLM.
#[derive(Clone)]
pub struct PreferenceExtractor {
    llm: Arc<dyn LlmClient>,
}

impl PreferenceExtractor {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Runs one extraction; transport and parse errors surface to the caller
    /// so tests can assert on the failure path directly.
    pub async fn try_extract(&self, history: &[Message]) -> anyhow::Result<Preferences> {
        let transcript = render_transcript(history);
        let prompt = extraction_prompt(&transcript);
        let reply = self.llm.complete(&prompt).await?;
        let json = strip_code_fence(&reply);
        let prefs: Preferences = serde_json::from_str(json)
            .map_err(|e| anyhow::anyhow!("extraction reply was not valid preferences JSON: {e}"))?;
        Ok(prefs)
    }

    /// Default-on-failure wrapper: any error (remote call, invalid JSON,
    /// schema mismatch) yields the all-defaults record. Never errors.
    pub async fn extract(&self, history: &[Message]) -> Preferences {
        match self.try_extract(history).await {
            Ok(prefs) => {
                debug!(age = ?prefs.age, spending_categories = prefs.spending.len(), "extracted preferences");
                prefs
            }
            Err(e) => {
                warn!(error = %e, "preference extraction failed, using defaults");
                Preferences::default()
            }
        }
    }
}

/// Strips a surrounding markdown code fence (```json ... ```), if present.
/// Models often wrap JSON replies in fences even when asked not to.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::strip_code_fence;

    #[test]
    fn strips_json_fence() {
        assert_eq!(strip_code_fence("```json\n{\"age\": 30}\n```"), "{\"age\": 30}");
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fence("  {\"age\": 30} "), "{\"age\": 30}");
    }
}
