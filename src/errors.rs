use crate::validation::Violation;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

/// Errors a handler can answer with. Each maps to a JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid payload: {} violation(s)", .0.len())]
    Validation(Vec<Violation>),

    #[error("Movie not found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(violations) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": violations }))).into_response()
            }
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Movie not found" })),
            )
                .into_response(),
        }
    }
}

impl From<Vec<Violation>> for ApiError {
    fn from(violations: Vec<Violation>) -> Self {
        ApiError::Validation(violations)
    }
}

/// Failures loading the bundled dataset at startup.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("seed data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("seed record {index} is invalid: {violations:?}")]
    InvalidRecord {
        index: usize,
        violations: Vec<Violation>,
    },

    #[error("seed record {index} has an empty id")]
    MissingId { index: usize },

    #[error("seed data contains duplicate id {0}")]
    DuplicateId(String),
}
