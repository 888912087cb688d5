//! API errors. Bodies are `{"detail": "..."}`; internal causes are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Idea is required")]
    IdeaRequired,
    #[error("Idea must be at most {0} characters")]
    IdeaTooLong(usize),
    #[error("Invalid request body")]
    InvalidBody,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::IdeaRequired | ApiError::IdeaTooLong(_) | ApiError::InvalidBody => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = match &self {
            ApiError::Internal(cause) => {
                tracing::error!(cause = %cause, "[PROTOAI] error in generate_blueprint");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (self.status(), Json(json!({ "detail": detail }))).into_response()
    }
}
