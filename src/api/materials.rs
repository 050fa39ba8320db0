//! Semantic material lookup endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::quote::confidence_tier;

use super::error::ApiError;
use super::routes::AppState;
use super::types::{MaterialsQuery, MaterialsResponse, RankedMaterial};

/// Results returned per lookup.
const RESULT_LIMIT: usize = 10;

/// GET /api/materials?query=... - Search the catalog by semantic similarity.
pub async fn search_materials(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MaterialsQuery>,
) -> Result<Json<MaterialsResponse>, ApiError> {
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::validation("Missing query parameter"))?;

    let rows = state
        .catalog
        .search(query, RESULT_LIMIT)
        .await
        .map_err(|e| ApiError::upstream("Failed to search materials", e))?;

    let data = rows
        .into_iter()
        .map(|row| RankedMaterial {
            confidence_tier: confidence_tier(row.similarity_score),
            row,
        })
        .collect();

    Ok(Json(MaterialsResponse { data }))
}
