//! Request and response types for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::catalog::{FeedbackRow, MaterialRow};
use crate::quote::{ConfidenceTier, Task};

/// Body of `POST /api/proposal`.
#[derive(Debug, Deserialize)]
pub struct ProposalRequest {
    /// Free-text transcript of the customer conversation.
    pub transcript: Option<String>,
}

/// Response of `POST /api/proposal`.
#[derive(Debug, Serialize)]
pub struct ProposalResponse {
    pub tasks: Vec<Task>,
}

/// Query string of `GET /api/materials`.
#[derive(Debug, Deserialize)]
pub struct MaterialsQuery {
    pub query: Option<String>,
}

/// A catalog hit with its confidence tier attached.
#[derive(Debug, Serialize)]
pub struct RankedMaterial {
    #[serde(flatten)]
    pub row: MaterialRow,
    pub confidence_tier: ConfidenceTier,
}

/// Response of `GET /api/materials`.
#[derive(Debug, Serialize)]
pub struct MaterialsResponse {
    pub data: Vec<RankedMaterial>,
}

/// Body of `POST /api/feedback`. Fields arrive as free-form strings and are
/// validated against the closed enumerations before persistence.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub task_id: Option<String>,
    pub quote_id: Option<String>,
    pub user_type: Option<String>,
    pub verdict: Option<String>,
    pub comment: Option<String>,
}

/// Response of `POST /api/feedback`.
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub message: String,
    pub data: FeedbackRow,
}

/// Response of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
