//! Session store: per-user conversation state with JSON file persistence.
//!
//! The in-memory map is authoritative for the lifetime of the process;
//! `persist` rewrites the whole file after mutations and swallows write
//! failures (a restart then loses unpersisted turns). The `RwLock` makes each
//! operation atomic, but there is no cross-operation lock per session:
//! concurrent turns for the same id may interleave.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::prompts::OPENING_MESSAGE;
use crate::types::{Message, Preferences, Session};

/// Process-wide session store, keyed by client-supplied session id.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    /// Persistence target; `None` keeps sessions in memory only.
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Creates a store with no durable persistence (tests, local runs).
    pub fn in_memory() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            path: None,
        }
    }

    /// Creates a store persisted to the given JSON file, loading prior
    /// contents if the file exists. A corrupt or unreadable file is logged
    /// and ignored; the store starts empty.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let sessions = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<HashMap<String, Session>>(&contents) {
                Ok(sessions) => {
                    info!(path = %path.display(), count = sessions.len(), "loaded sessions");
                    sessions
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse sessions file, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read sessions file, starting empty");
                HashMap::new()
            }
        };
        Self {
            sessions: Arc::new(RwLock::new(sessions)),
            path: Some(path),
        }
    }

    /// Returns the session for `session_id`, creating it seeded with the
    /// opening bot greeting if absent.
    pub async fn get_or_create(&self, session_id: &str) -> Session {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(Self::seeded)
            .clone()
    }

    /// Lookup-only access; `None` for unknown ids.
    pub async fn get(&self, session_id: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    /// Appends a message, creating and seeding the session if absent.
    pub async fn append_message(&self, session_id: &str, message: Message) {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(Self::seeded)
            .history
            .push(message);
    }

    /// Replaces the session's preferences wholesale.
    pub async fn set_preferences(&self, session_id: &str, prefs: Preferences) {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(Self::seeded)
            .preferences = Some(prefs);
    }

    /// Returns the number of sessions.
    pub async fn len(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    /// Returns true if no session exists.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Rewrites the whole store to the persistence file. Failures are logged
    /// and swallowed; the in-memory state stays authoritative.
    pub async fn persist(&self) {
        let Some(ref path) = self.path else {
            return;
        };
        let json = {
            let sessions = self.sessions.read().await;
            match serde_json::to_string_pretty(&*sessions) {
                Ok(json) => json,
                Err(e) => {
                    error!(error = %e, "failed to serialize sessions");
                    return;
                }
            }
        };
        if let Err(e) = tokio::fs::write(path, json).await {
            error!(path = %path.display(), error = %e, "failed to persist sessions");
        }
    }

    fn seeded() -> Session {
        Session {
            history: vec![Message::bot(OPENING_MESSAGE)],
            preferences: None,
        }
    }
}
