//! Shared application state injected into request handlers.

use std::sync::Arc;

use cardwise_core::{ChatOrchestrator, PreferenceExtractor, Recommender, SessionStore};

/// Capabilities the handlers need: the session store plus the three
/// pipeline entry points, all constructed once at startup.
pub struct AppState {
    pub store: Arc<SessionStore>,
    pub chat: ChatOrchestrator,
    pub extractor: PreferenceExtractor,
    pub recommender: Recommender,
}
