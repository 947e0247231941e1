use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::GenerationError;

/// Errors surfaced by the HTTP endpoint.
///
/// Request validation failures are answered with a plain 200 JSON body
/// carrying a human-readable `message`; callers only ever see those two
/// shapes or an opaque 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid security key!")]
    InvalidSecurityKey,

    #[error("Missing parameters!")]
    MissingParameters { query: BTreeMap<String, String> },

    #[error("Suggestion generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidSecurityKey => (
                StatusCode::OK,
                Json(json!({ "message": self.to_string() })),
            )
                .into_response(),
            AppError::MissingParameters { ref query } => (
                StatusCode::OK,
                Json(json!({ "message": self.to_string(), "query": query })),
            )
                .into_response(),
            AppError::Generation(e) => {
                tracing::error!("Suggestion generation failed: {e}");
                let body = Json(json!({
                    "error": {
                        "code": "GENERATION_ERROR",
                        "message": "An AI processing error occurred"
                    }
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
