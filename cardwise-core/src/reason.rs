//! Per-card recommendation justification via the LLM.

use std::sync::Arc;

use llm_client::LlmClient;
use tracing::warn;

use crate::render::{card_summary, profile_summary};
use crate::types::{Card, Preferences};

/// Fallback justification when the completion fails.
pub const REASON_FALLBACK: &str = "Explanation not available.";

/// Generates a short natural-language justification for a recommended card.
#[derive(Clone)]
pub struct ReasonGenerator {
    llm: Arc<dyn LlmClient>,
}

impl ReasonGenerator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Returns a 1-2 sentence justification referencing both the user's
    /// preferences and the card's features. On model failure returns
    /// [`REASON_FALLBACK`]; never errors. Output is not deterministic.
    pub async fn explain(&self, card: &Card, prefs: &Preferences) -> String {
        let prompt = format!(
            "Given the following user profile and credit card details, explain in 1-2 sentences why this card is a good fit for the user. \
             Be specific and reference both the user's preferences and the card's features.\n\
             User profile: {}\nCard details: {}",
            profile_summary(prefs),
            card_summary(card),
        );

        match self.llm.complete(&prompt).await {
            Ok(reply) => reply.trim().to_string(),
            Err(e) => {
                warn!(card = %card.name, error = %e, "reason generation failed");
                REASON_FALLBACK.to_string()
            }
        }
    }
}
