//! API error taxonomy and HTTP mapping.
//!
//! Validation failures and missing references are reported verbatim;
//! upstream failures are logged in full and reported to the caller with a
//! generic message only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid request field.
    #[error("{0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// An external collaborator call failed.
    #[error("{context}")]
    Upstream {
        /// Generic message returned to the caller.
        context: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn upstream(context: &'static str, source: anyhow::Error) -> Self {
        Self::Upstream { context, source }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Validation(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Upstream { context, source } => {
                tracing::error!("{}: {:#}", context, source);
                context.to_string()
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::validation("Missing required fields").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::not_found("Quote not found").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::upstream("Failed to generate proposal", anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_hides_internal_detail() {
        let err = ApiError::upstream(
            "Failed to generate proposal",
            anyhow::anyhow!("supabase: connection refused"),
        );
        assert_eq!(err.to_string(), "Failed to generate proposal");
    }
}
