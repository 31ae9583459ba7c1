//! Recommendation retrieval pipeline: preferences in, annotated cards out.

use std::sync::Arc;

use embedding::EmbeddingService;
use tracing::{debug, instrument, warn};
use vector_index::VectorIndex;

use crate::error::CardwiseError;
use crate::extract::PreferenceExtractor;
use crate::reason::ReasonGenerator;
use crate::render::preferences_to_summary;
use crate::rewards::RewardSimulator;
use crate::types::{Card, Recommendation, Session};

/// Retrieves and annotates card recommendations for a session.
///
/// Holds the extractor as an explicit dependency: when the session has no
/// usable preferences yet, the pipeline extracts them from the history
/// before building the query vector.
#[derive(Clone)]
pub struct Recommender {
    extractor: PreferenceExtractor,
    embeddings: Arc<dyn EmbeddingService>,
    index: Arc<dyn VectorIndex>,
    rewards: RewardSimulator,
    reasons: ReasonGenerator,
}

impl Recommender {
    pub fn new(
        extractor: PreferenceExtractor,
        embeddings: Arc<dyn EmbeddingService>,
        index: Arc<dyn VectorIndex>,
        rewards: RewardSimulator,
        reasons: ReasonGenerator,
    ) -> Self {
        Self {
            extractor,
            embeddings,
            index,
            rewards,
            reasons,
        }
    }

    /// Returns up to `top_k` recommendations in index ranking order.
    ///
    /// Preferences lacking entirely or missing the age field are re-extracted
    /// from the session history first. Embedding and index failures surface
    /// as errors; reward and reason failures degrade per card.
    #[instrument(skip(self, session))]
    pub async fn recommend(
        &self,
        session: &Session,
        top_k: usize,
    ) -> Result<Vec<Recommendation>, CardwiseError> {
        let prefs = match &session.preferences {
            Some(prefs) if prefs.age.is_some() => prefs.clone(),
            _ => self.extractor.extract(&session.history).await,
        };

        let summary = preferences_to_summary(&prefs);
        debug!(summary = %summary, "embedding preference summary");

        let vector = self
            .embeddings
            .embed(&summary)
            .await
            .map_err(|e| CardwiseError::Embedding(e.to_string()))?;

        let matches = self
            .index
            .query(&vector, top_k)
            .await
            .map_err(|e| CardwiseError::Index(e.to_string()))?;

        let mut recommendations = Vec::with_capacity(matches.len());
        for m in matches {
            let card: Card = match serde_json::from_value(m.metadata) {
                Ok(card) => card,
                Err(e) => {
                    warn!(id = %m.id, error = %e, "skipping match with malformed metadata");
                    continue;
                }
            };

            let (reward_simulation, reward_details) = self.rewards.simulate(&card, &prefs).await;
            let llm_reason = self.reasons.explain(&card, &prefs).await;

            recommendations.push(Recommendation {
                card,
                reward_simulation,
                reward_details,
                llm_reason,
            });
        }

        debug!(count = recommendations.len(), "built recommendations");
        Ok(recommendations)
    }
}
