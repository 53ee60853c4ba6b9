use super::{AppState, handlers};
use crate::cors;
use axum::Router;
use axum::middleware;
use axum::routing::get;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builds the full Axum router: movie routes, origin filter, CORS headers
/// and request tracing.
pub fn build(state: AppState, allowed_origins: Vec<String>) -> Router {
    let cors = cors::cors_layer(&allowed_origins);
    let allowed_origins = Arc::new(allowed_origins);

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/movies",
            get(handlers::list_movies).post(handlers::create_movie),
        )
        .route(
            "/movies/{id}",
            get(handlers::get_movie)
                .delete(handlers::delete_movie)
                .patch(handlers::update_movie),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(
                    allowed_origins,
                    cors::reject_disallowed_origin,
                ))
                .layer(cors),
        )
        .with_state(state)
}
