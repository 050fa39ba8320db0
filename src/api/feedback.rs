//! Quote feedback endpoint.
//!
//! Feedback is append-only: rows are validated, stamped with a
//! server-assigned timestamp, and inserted; nothing is ever updated or
//! deleted here.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::catalog::{FeedbackRow, UserType, Verdict};

use super::error::ApiError;
use super::routes::AppState;
use super::types::{FeedbackRequest, FeedbackResponse};

/// POST /api/feedback - Record a user's verdict on a quote.
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let feedback = validate(req)?;

    let quote = state
        .store
        .get_quote(&feedback.quote_id)
        .await
        .map_err(|e| ApiError::upstream("Failed to store feedback", e))?;

    if quote.is_none() {
        return Err(ApiError::not_found("Quote not found"));
    }

    let row = FeedbackRow {
        id: None,
        task_id: feedback.task_id,
        quote_id: feedback.quote_id,
        user_type: feedback.user_type,
        verdict: feedback.verdict,
        comment: feedback.comment,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    let stored = state
        .store
        .insert_feedback(&row)
        .await
        .map_err(|e| ApiError::upstream("Failed to store feedback", e))?;

    tracing::info!(
        "Recorded {} feedback from {} on quote {}",
        stored.verdict,
        stored.user_type,
        stored.quote_id
    );

    Ok(Json(FeedbackResponse {
        message: "Feedback recorded successfully".to_string(),
        data: stored,
    }))
}

/// A feedback submission that passed validation.
#[derive(Debug)]
struct ValidFeedback {
    task_id: Option<String>,
    quote_id: String,
    user_type: UserType,
    verdict: Verdict,
    comment: Option<String>,
}

/// Check required fields and closed enumerations before touching the store.
fn validate(req: FeedbackRequest) -> Result<ValidFeedback, ApiError> {
    let quote_id = req.quote_id.filter(|s| !s.is_empty());
    let user_type = req.user_type.filter(|s| !s.is_empty());
    let verdict = req.verdict.filter(|s| !s.is_empty());

    let (Some(quote_id), Some(user_type), Some(verdict)) = (quote_id, user_type, verdict) else {
        return Err(ApiError::validation("Missing required fields"));
    };

    let user_type = UserType::parse(&user_type)
        .ok_or_else(|| ApiError::validation("Invalid user_type"))?;
    let verdict =
        Verdict::parse(&verdict).ok_or_else(|| ApiError::validation("Invalid verdict"))?;

    Ok(ValidFeedback {
        task_id: req.task_id,
        quote_id,
        user_type,
        verdict,
        comment: req.comment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user_type: &str, verdict: &str) -> FeedbackRequest {
        FeedbackRequest {
            task_id: Some("task-1".to_string()),
            quote_id: Some("quote-42".to_string()),
            user_type: Some(user_type.to_string()),
            verdict: Some(verdict.to_string()),
            comment: None,
        }
    }

    #[test]
    fn test_valid_feedback_passes() {
        let valid = validate(request("contractor", "accurate")).unwrap();
        assert_eq!(valid.quote_id, "quote-42");
        assert_eq!(valid.user_type, UserType::Contractor);
        assert_eq!(valid.verdict, Verdict::Accurate);
    }

    #[test]
    fn test_unknown_user_type_is_rejected() {
        let err = validate(request("inspector", "accurate")).unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref msg) if msg == "Invalid user_type"));
    }

    #[test]
    fn test_unknown_verdict_is_rejected() {
        let err = validate(request("client", "fair")).unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref msg) if msg == "Invalid verdict"));
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let err = validate(FeedbackRequest {
            task_id: None,
            quote_id: None,
            user_type: Some("client".to_string()),
            verdict: Some("accurate".to_string()),
            comment: None,
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref msg) if msg == "Missing required fields"));
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let err = validate(request("", "accurate")).unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref msg) if msg == "Missing required fields"));
    }
}
