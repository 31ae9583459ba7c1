//! In-memory implementation of [`VectorIndex`].
//!
//! Ranks by cosine similarity over a `HashMap` behind `Arc<RwLock<..>>`.
//! Data is lost on restart; intended for tests and local development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{IndexMatch, IndexRecord, VectorIndex};

/// In-memory vector index for testing and development.
#[derive(Debug, Clone)]
pub struct InMemoryVectorIndex {
    records: Arc<RwLock<HashMap<String, IndexRecord>>>,
}

impl InMemoryVectorIndex {
    /// Creates a new empty in-memory index.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of records in the index.
    pub async fn len(&self) -> usize {
        let records = self.records.read().await;
        records.len()
    }

    /// Returns true if the index is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }
}

impl Default for InMemoryVectorIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<IndexMatch>, anyhow::Error> {
        let records = self.records.read().await;

        let mut matches: Vec<IndexMatch> = records
            .values()
            .map(|record| IndexMatch {
                id: record.id.clone(),
                score: Self::cosine_similarity(vector, &record.values),
                metadata: record.metadata.clone(),
            })
            .collect();

        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        matches.truncate(top_k);

        debug!(
            top_k = top_k,
            returned = matches.len(),
            "in-memory index query"
        );

        Ok(matches)
    }

    async fn upsert(&self, new_records: Vec<IndexRecord>) -> Result<(), anyhow::Error> {
        let mut records = self.records.write().await;
        for record in new_records {
            records.insert(record.id.clone(), record);
        }
        Ok(())
    }
}
