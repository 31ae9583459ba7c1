use thiserror::Error;

/// Boundary errors surfaced to the HTTP layer. Remote-call failures inside
/// extraction, explanation, and reward simulation never reach this type;
/// they degrade to fixed defaults at the call site.
#[derive(Error, Debug)]
pub enum CardwiseError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Vector index error: {0}")]
    Index(String),
}

pub type Result<T> = std::result::Result<T, CardwiseError>;
