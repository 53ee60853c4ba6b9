use crate::errors::ApiError;
use crate::validation::Violation;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Query string for GET /movies
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub genre: Option<String>,
}

/// `{"message": ...}` body used by DELETE
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Raw JSON request body. Unlike `axum::Json` it rejects unreadable or
/// malformed bodies with the same 400 `{"error": [...]}` shape as schema
/// violations, and doesn't insist on a content type. A missing body reads
/// as `{}` so the schema reports whichever fields are required.
#[derive(Debug)]
pub struct Payload(pub Value);

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(vec![Violation::body(None, e.body_text())]))?;

        if bytes.is_empty() {
            return Ok(Payload(Value::Object(Map::new())));
        }

        serde_json::from_slice(&bytes)
            .map(Payload)
            .map_err(|e| ApiError::Validation(vec![Violation::body(None, e.to_string())]))
    }
}
