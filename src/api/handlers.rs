use super::AppState;
use super::models::{ListQuery, MessageResponse, Payload};
use crate::errors::ApiError;
use crate::models::Movie;
use crate::validation;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

/// GET /health — simple liveness check
pub async fn health() -> &'static str {
    "OK"
}

/// GET /movies — every movie, or only those tagged with `?genre=`
pub async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Movie>> {
    let store = state.store.read().await;

    match query.genre.as_deref() {
        Some(genre) if !genre.is_empty() => Json(store.by_genre(genre)),
        _ => Json(store.all().to_vec()),
    }
}

/// GET /movies/{id}
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let store = state.store.read().await;

    store.find(&id).cloned().map(Json).ok_or_else(|| {
        tracing::debug!("movie {id} not found");
        ApiError::NotFound
    })
}

/// POST /movies — validates the full payload and stores it under a new id
pub async fn create_movie(
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let data = validation::validate_movie(&state.schema(), &body).inspect_err(|violations| {
        tracing::debug!("rejected create payload: {} violation(s)", violations.len())
    })?;

    let movie = Movie::new(data);
    state.store.write().await.insert(movie.clone());
    tracing::info!("created movie {} ({})", movie.id, movie.title);

    Ok((StatusCode::CREATED, Json(movie)))
}

/// DELETE /movies/{id}
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state.store.write().await.remove(&id);

    match removed {
        Some(movie) => {
            tracing::info!("deleted movie {} ({})", movie.id, movie.title);
            Ok(Json(MessageResponse {
                message: "Movie deleted",
            }))
        }
        None => {
            tracing::debug!("movie {id} not found");
            Err(ApiError::NotFound)
        }
    }
}

/// PATCH /movies/{id} — merges the present fields. Answers 201 on success.
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(body): Payload,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let patch = validation::validate_partial_movie(&state.schema(), &body).inspect_err(
        |violations| tracing::debug!("rejected patch for {id}: {} violation(s)", violations.len()),
    )?;

    let mut store = state.store.write().await;
    let movie = store.update(&id, patch).cloned().ok_or_else(|| {
        tracing::debug!("movie {id} not found");
        ApiError::NotFound
    })?;
    tracing::info!("updated movie {}", movie.id);

    Ok((StatusCode::CREATED, Json(movie)))
}
