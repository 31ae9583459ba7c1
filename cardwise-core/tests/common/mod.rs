//! Shared test doubles for cardwise-core integration tests.
//!
//! Provides MockLlm (LlmClient), MockEmbedding (EmbeddingService), and
//! MockIndex (VectorIndex) so pipeline tests never touch the network.

use std::sync::Mutex;

use async_trait::async_trait;
use embedding::EmbeddingService;
use llm_client::LlmClient;
use vector_index::{IndexMatch, IndexRecord, VectorIndex};

/// Scripted LLM: records every prompt and answers by prompt kind.
/// Extraction prompts get `extraction_reply`, reward prompts a fixed
/// simulation JSON, everything else a fixed reason sentence.
pub struct MockLlm {
    pub prompts: Mutex<Vec<String>>,
    pub extraction_reply: String,
    pub fail: bool,
}

#[allow(dead_code)]
impl MockLlm {
    pub fn new(extraction_reply: &str) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            extraction_reply: extraction_reply.to_string(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            extraction_reply: String::new(),
            fail: true,
        }
    }

    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            anyhow::bail!("mock llm unavailable");
        }
        if prompt.contains("data extractor") {
            return Ok(self.extraction_reply.clone());
        }
        if prompt.contains("financial assistant") {
            return Ok(r#"{"total_rewards_inr": 500, "details": ["₹500/year on dining"]}"#
                .to_string());
        }
        Ok("This card matches your spending profile.".to_string())
    }
}

/// Embedding double: records every embedded text, returns a fixed vector.
pub struct MockEmbedding {
    pub texts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockEmbedding {
    pub fn new() -> Self {
        Self {
            texts: Mutex::new(Vec::new()),
        }
    }

    pub fn embedded_texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmbeddingService for MockEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        self.texts.lock().unwrap().push(text.to_string());
        Ok(vec![0.1, 0.2, 0.3])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        let mut recorded = self.texts.lock().unwrap();
        for text in texts {
            recorded.push(text.clone());
        }
        Ok(texts.iter().map(|_| vec![0.1, 0.2, 0.3]).collect())
    }
}

/// Index double: returns preset matches, records query vectors.
pub struct MockIndex {
    pub matches: Vec<IndexMatch>,
    pub queries: Mutex<Vec<Vec<f32>>>,
}

#[allow(dead_code)]
impl MockIndex {
    pub fn new(matches: Vec<IndexMatch>) -> Self {
        Self {
            matches,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_queries(&self) -> Vec<Vec<f32>> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl VectorIndex for MockIndex {
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<IndexMatch>, anyhow::Error> {
        self.queries.lock().unwrap().push(vector.to_vec());
        Ok(self.matches.iter().take(top_k).cloned().collect())
    }

    async fn upsert(&self, _records: Vec<IndexRecord>) -> Result<(), anyhow::Error> {
        Ok(())
    }
}
