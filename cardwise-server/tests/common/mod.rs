//! Test doubles for handler tests: scripted LLM, fixed embedding, preset index.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cardwise_core::{
    ChatOrchestrator, PreferenceExtractor, ReasonGenerator, Recommender, RewardSimulator,
    SessionStore,
};
use cardwise_server::AppState;
use embedding::EmbeddingService;
use llm_client::LlmClient;
use vector_index::{IndexMatch, IndexRecord, VectorIndex};

pub struct MockLlm {
    pub prompts: Mutex<Vec<String>>,
    pub extraction_reply: String,
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if prompt.contains("data extractor") {
            return Ok(self.extraction_reply.clone());
        }
        if prompt.contains("financial assistant") {
            return Ok(r#"{"total_rewards_inr": 240, "details": ["detail line"]}"#.to_string());
        }
        Ok("A fine card for you.".to_string())
    }
}

pub struct MockEmbedding;

#[async_trait]
impl EmbeddingService for MockEmbedding {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, anyhow::Error> {
        Ok(vec![1.0, 0.0])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }
}

pub struct MockIndex {
    pub matches: Vec<IndexMatch>,
}

#[async_trait]
impl VectorIndex for MockIndex {
    async fn query(
        &self,
        _vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<IndexMatch>, anyhow::Error> {
        Ok(self.matches.iter().take(top_k).cloned().collect())
    }

    async fn upsert(&self, _records: Vec<IndexRecord>) -> Result<(), anyhow::Error> {
        Ok(())
    }
}

/// Builds an AppState wired entirely from test doubles.
pub fn app_state(extraction_reply: &str, matches: Vec<IndexMatch>) -> Arc<AppState> {
    let llm: Arc<dyn LlmClient> = Arc::new(MockLlm {
        prompts: Mutex::new(Vec::new()),
        extraction_reply: extraction_reply.to_string(),
    });
    let embeddings: Arc<dyn EmbeddingService> = Arc::new(MockEmbedding);
    let index: Arc<dyn VectorIndex> = Arc::new(MockIndex { matches });
    let store = Arc::new(SessionStore::in_memory());

    let extractor = PreferenceExtractor::new(llm.clone());
    let recommender = Recommender::new(
        extractor.clone(),
        embeddings,
        index,
        RewardSimulator::new(llm.clone()),
        ReasonGenerator::new(llm.clone()),
    );

    Arc::new(AppState {
        store: store.clone(),
        chat: ChatOrchestrator::new(llm, store),
        extractor,
        recommender,
    })
}
