use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Requests without an origin (curl, same-origin) are always allowed;
/// otherwise the origin must be on the allow-list verbatim.
pub fn is_origin_allowed(origin: Option<&str>, allow_list: &[String]) -> bool {
    match origin {
        None => true,
        Some(origin) => allow_list.iter().any(|allowed| allowed == origin),
    }
}

/// Middleware rejecting requests whose `Origin` is not allow-listed before
/// they reach the router.
pub async fn reject_disallowed_origin(
    State(allow_list): State<Arc<Vec<String>>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = match request.headers().get(header::ORIGIN) {
        None => None,
        Some(value) => match value.to_str() {
            Ok(origin) => Some(origin),
            Err(_) => return forbidden("<non-ascii>"),
        },
    };

    if !is_origin_allowed(origin, &allow_list) {
        return forbidden(origin.unwrap_or_default());
    }

    next.run(request).await
}

fn forbidden(origin: &str) -> Response {
    tracing::warn!("rejected request from origin {origin}");
    (StatusCode::FORBIDDEN, "Not allowed by CORS").into_response()
}

/// CORS response headers and preflight handling for the allow-listed origins.
pub fn cors_layer(allow_list: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allow_list.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}
