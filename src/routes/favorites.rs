use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    routes::movies::MovieResponse,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    /// Catalog position of the movie to add
    pub index: usize,
}

/// Handler listing the favorites in insertion order
pub async fn list(State(state): State<AppState>) -> Json<Vec<MovieResponse>> {
    let favorites = state.favorites.read().await;
    let movies = favorites
        .entries()
        .iter()
        .filter_map(|&index| state.catalog.get(index))
        .map(MovieResponse::from)
        .collect();
    Json(movies)
}

/// Handler adding a movie to the favorites
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddFavoriteRequest>,
) -> AppResult<(StatusCode, Json<MovieResponse>)> {
    let movie = state.catalog.get(request.index).ok_or_else(|| {
        AppError::InvalidInput(format!("No movie at catalog position {}", request.index))
    })?;

    let mut favorites = state.favorites.write().await;
    if !favorites.add(request.index) {
        return Err(AppError::InvalidInput(format!(
            "{} is already in favorites",
            movie.title
        )));
    }

    tracing::info!(index = request.index, title = %movie.title, "Added to favorites");

    Ok((StatusCode::CREATED, Json(MovieResponse::from(movie))))
}

/// Handler removing one movie from the favorites
pub async fn remove(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> AppResult<StatusCode> {
    let mut favorites = state.favorites.write().await;
    if !favorites.remove(index) {
        return Err(AppError::NotFound(format!(
            "Catalog position {} is not in favorites",
            index
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Handler clearing the whole favorites list
pub async fn clear(State(state): State<AppState>) -> StatusCode {
    let mut favorites = state.favorites.write().await;
    favorites.clear();
    StatusCode::NO_CONTENT
}
