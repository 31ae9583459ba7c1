//! Chat orchestration: one conversational turn per call.

use std::sync::Arc;

use llm_client::LlmClient;
use tracing::{error, instrument};

use crate::prompts::{render_transcript, CHAT_FALLBACK_REPLY, SYSTEM_PROMPT};
use crate::session::SessionStore;
use crate::types::Message;

/// Drives one request-response turn against the LLM and the session store.
///
/// Each turn appends exactly two messages (user, then bot) and persists the
/// store. A completion failure degrades to a fixed fallback reply; the turn
/// itself never fails.
#[derive(Clone)]
pub struct ChatOrchestrator {
    llm: Arc<dyn LlmClient>,
    store: Arc<SessionStore>,
}

impl ChatOrchestrator {
    pub fn new(llm: Arc<dyn LlmClient>, store: Arc<SessionStore>) -> Self {
        Self { llm, store }
    }

    /// Runs one turn for `session_id` and returns the reply plus the full
    /// history (including the seeded greeting for new sessions).
    #[instrument(skip(self, user_input))]
    pub async fn turn(&self, session_id: &str, user_input: &str) -> (String, Vec<Message>) {
        self.store
            .append_message(session_id, Message::user(user_input))
            .await;

        let session = self.store.get_or_create(session_id).await;
        let prompt = format!("{SYSTEM_PROMPT}\n{}", render_transcript(&session.history));

        let reply = match self.llm.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!(session_id, error = %e, "chat completion failed");
                CHAT_FALLBACK_REPLY.to_string()
            }
        };

        self.store
            .append_message(session_id, Message::bot(reply.clone()))
            .await;
        self.store.persist().await;

        let history = self
            .store
            .get(session_id)
            .await
            .map(|s| s.history)
            .unwrap_or_default();

        (reply, history)
    }
}
