//! Pinecone implementation of [`VectorIndex`].
//!
//! Talks to a Pinecone-style data plane over HTTPS: `POST /query` and
//! `POST /vectors/upsert` with an `Api-Key` header.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{IndexMatch, IndexRecord, VectorIndex};

/// Pinecone connection config.
#[derive(Debug, Clone)]
pub struct PineconeConfig {
    pub api_key: String,
    /// Index host, e.g. "https://credit-cards-abc123.svc.us-east-1.pinecone.io".
    pub index_host: String,
}

impl PineconeConfig {
    /// Load from environment variables PINECONE_API_KEY and PINECONE_INDEX_HOST.
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var("PINECONE_API_KEY").context("PINECONE_API_KEY not set")?;
        let index_host =
            std::env::var("PINECONE_INDEX_HOST").context("PINECONE_INDEX_HOST not set")?;
        Ok(Self { api_key, index_host })
    }
}

/// HTTP client for one Pinecone index.
#[derive(Debug, Clone)]
pub struct PineconeIndex {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    vector: &'a [f32],
    #[serde(rename = "topK")]
    top_k: usize,
    #[serde(rename = "includeMetadata")]
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<PineconeMatch>,
}

#[derive(Deserialize)]
struct PineconeMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<Value>,
}

#[derive(Serialize)]
struct UpsertRequest {
    vectors: Vec<IndexRecord>,
}

impl PineconeIndex {
    /// Creates a client for the configured index host.
    pub fn new(config: PineconeConfig) -> Self {
        let host = config.index_host.trim_end_matches('/');
        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{host}")
        };
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key,
            base_url,
        }
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    #[instrument(skip(self, vector))]
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<IndexMatch>, anyhow::Error> {
        let url = format!("{}/query", self.base_url);
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };

        let response: QueryResponse = self
            .http
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("pinecone query request failed")?
            .error_for_status()
            .context("pinecone query returned an error status")?
            .json()
            .await
            .context("pinecone query response was not valid JSON")?;

        debug!(
            top_k = top_k,
            returned = response.matches.len(),
            "pinecone query"
        );

        Ok(response
            .matches
            .into_iter()
            .map(|m| IndexMatch {
                id: m.id,
                score: m.score,
                metadata: m.metadata.unwrap_or(Value::Null),
            })
            .collect())
    }

    #[instrument(skip(self, records))]
    async fn upsert(&self, records: Vec<IndexRecord>) -> Result<(), anyhow::Error> {
        let url = format!("{}/vectors/upsert", self.base_url);
        let count = records.len();

        self.http
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&UpsertRequest { vectors: records })
            .send()
            .await
            .context("pinecone upsert request failed")?
            .error_for_status()
            .context("pinecone upsert returned an error status")?;

        debug!(count = count, "pinecone upsert");
        Ok(())
    }
}
