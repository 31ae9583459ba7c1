//! Request/response bodies for the HTTP surface.

use cardwise_core::types::{Message, Recommendation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub user_input: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub history: Vec<Message>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub session_id: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    3
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<RecommendationDto>,
}

/// Minimal card view returned to the client; optional links collapse to "".
#[derive(Debug, Serialize)]
pub struct RecommendationDto {
    pub name: String,
    pub image_url: String,
    pub apply_link: String,
    pub reward_simulation: String,
    pub reward_details: Vec<String>,
    pub llm_reason: String,
}

impl From<Recommendation> for RecommendationDto {
    fn from(rec: Recommendation) -> Self {
        Self {
            name: rec.card.name,
            image_url: rec.card.image_url.unwrap_or_default(),
            apply_link: rec.card.apply_link.unwrap_or_default(),
            reward_simulation: rec.reward_simulation,
            reward_details: rec.reward_details,
            llm_reason: rec.llm_reason,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
