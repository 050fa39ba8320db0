//! Proposal generation endpoint.

use axum::{extract::State, Json};
use std::sync::Arc;

use super::error::ApiError;
use super::routes::AppState;
use super::types::{ProposalRequest, ProposalResponse};

/// POST /api/proposal - Generate a priced proposal from a transcript.
pub async fn generate_proposal(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProposalRequest>,
) -> Result<Json<ProposalResponse>, ApiError> {
    let transcript = req
        .transcript
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::validation("Missing transcript in request body"))?;

    let tasks = state
        .generator
        .generate(transcript)
        .await
        .map_err(|e| ApiError::upstream("Failed to generate proposal", e))?;

    tracing::info!("Generated proposal with {} tasks", tasks.len());

    Ok(Json(ProposalResponse { tasks }))
}
