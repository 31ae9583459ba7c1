//! # Vector Index
//!
//! This crate defines the nearest-neighbor index interface used for card
//! retrieval, along with two implementations:
//!
//! - [`PineconeIndex`]: HTTP client for a Pinecone-style data plane.
//! - [`InMemoryVectorIndex`]: cosine-similarity index for tests and local runs.
//!
//! Records carry arbitrary JSON metadata; the caller owns the schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

mod inmemory;
mod pinecone;

pub use inmemory::InMemoryVectorIndex;
pub use pinecone::{PineconeConfig, PineconeIndex};

/// A record stored in the index: id, embedding vector, JSON metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: Value,
}

/// A ranked query match with its similarity score and stored metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMatch {
    pub id: String,
    pub score: f32,
    pub metadata: Value,
}

/// Nearest-neighbor search over embedding vectors with attached metadata.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Returns up to `top_k` matches ranked most-similar first.
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<IndexMatch>, anyhow::Error>;

    /// Inserts or replaces records by id. Used at seeding time only.
    async fn upsert(&self, records: Vec<IndexRecord>) -> Result<(), anyhow::Error>;
}
