//! # Cardwise Core
//!
//! Domain core of the conversational credit-card recommendation backend.
//!
//! ## Modules
//!
//! - [`types`] - Session, Message, Preferences, Card, Recommendation
//! - [`session`] - session store with JSON file persistence
//! - [`chat`] - one conversational turn against the LLM
//! - [`extract`] - structured preference extraction from chat history
//! - [`render`] - deterministic text rendering for embedding and prompts
//! - [`rewards`] - annual reward estimation (LLM-first, regex fallback)
//! - [`reason`] - per-card recommendation justification
//! - [`recommend`] - retrieval pipeline over the vector index
//! - [`error`] - boundary error type
//! - [`logger`] - tracing initialization
//! - [`prompts`] - fixed prompt text and transcript rendering

pub mod chat;
pub mod error;
pub mod extract;
pub mod logger;
pub mod prompts;
pub mod reason;
pub mod recommend;
pub mod render;
pub mod rewards;
pub mod session;
pub mod types;

pub use chat::ChatOrchestrator;
pub use error::{CardwiseError, Result};
pub use extract::PreferenceExtractor;
pub use reason::ReasonGenerator;
pub use recommend::Recommender;
pub use rewards::RewardSimulator;
pub use session::SessionStore;
pub use types::{Card, IncomePeriod, Message, Preferences, Recommendation, Sender, Session};
