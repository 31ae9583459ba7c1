//! Request handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use cardwise_core::CardwiseError;
use tracing::{debug, instrument};

use crate::dto::{
    ChatRequest, ChatResponse, HealthResponse, RecommendParams, RecommendResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /chat — one conversational turn.
///
/// Both fields are required and must be non-empty; a rejected request
/// creates no session and mutates nothing.
#[instrument(skip(state, req))]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if req.session_id.trim().is_empty() || req.user_input.trim().is_empty() {
        return Err(CardwiseError::InvalidRequest(
            "session_id and user_input required".to_string(),
        )
        .into());
    }

    let (reply, history) = state.chat.turn(&req.session_id, &req.user_input).await;
    Ok(Json(ChatResponse { reply, history }))
}

/// POST /recommend?session_id=...&top_k=3 — extract, retrieve, annotate.
///
/// Re-extracts preferences from the latest history and persists them before
/// retrieval, so a session that kept chatting after its last extraction is
/// recommended against its current state.
#[instrument(skip(state))]
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let session = state
        .store
        .get(&params.session_id)
        .await
        .ok_or_else(|| CardwiseError::SessionNotFound(params.session_id.clone()))?;

    let prefs = state.extractor.extract(&session.history).await;
    debug!(session_id = %params.session_id, age = ?prefs.age, "extracted preferences for recommendation");
    state.store.set_preferences(&params.session_id, prefs).await;
    state.store.persist().await;

    let session = state
        .store
        .get(&params.session_id)
        .await
        .ok_or_else(|| CardwiseError::SessionNotFound(params.session_id.clone()))?;

    let top_k = params.top_k.max(1);
    let recommendations = state.recommender.recommend(&session, top_k).await?;

    Ok(Json(RecommendResponse {
        recommendations: recommendations.into_iter().map(Into::into).collect(),
    }))
}

/// GET /health — liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
