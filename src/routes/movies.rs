use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieDetails},
    services::browse::{self, BrowseFilter, FilterValues},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct BrowseParams {
    pub genre: Option<String>,
    pub director: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    #[serde(default)]
    pub offset: usize,
    pub limit: Option<usize>,
}

/// One catalog movie as returned by the browse endpoint
#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub index: usize,
    pub title: String,
    pub genres: String,
    pub director: String,
    pub release_date: String,
}

impl From<&Movie> for MovieResponse {
    fn from(movie: &Movie) -> Self {
        Self {
            index: movie.index,
            title: movie.title.clone(),
            genres: movie.genres.clone(),
            director: movie.director.clone(),
            release_date: movie.release_date.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BrowseResponse {
    /// Total matches before pagination
    pub total: usize,
    pub movies: Vec<MovieResponse>,
}

/// Handler for the catalog browse endpoint
pub async fn browse(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> Json<BrowseResponse> {
    let filter = BrowseFilter {
        genre: params.genre,
        director: params.director,
        year_from: params.year_from,
        year_to: params.year_to,
        offset: params.offset,
        limit: params.limit.unwrap_or(browse::DEFAULT_PAGE_SIZE),
    };

    let page = browse::browse(&state.catalog, &filter);

    Json(BrowseResponse {
        total: page.total,
        movies: page.movies.iter().map(MovieResponse::from).collect(),
    })
}

/// Handler for the distinct filter values endpoint
pub async fn filters(State(state): State<AppState>) -> Json<FilterValues> {
    Json(browse::filter_values(&state.catalog))
}

/// Handler for per-movie metadata details
///
/// Looks up the movie at the given catalog position and enriches it from the
/// metadata provider. A provider miss is a 404, not a failure.
pub async fn details(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> AppResult<Json<MovieDetails>> {
    let movie = state
        .catalog
        .get(index)
        .ok_or_else(|| AppError::NotFound(format!("No movie at catalog position {}", index)))?;

    let details = state
        .provider
        .movie_details(&movie.title)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No metadata found for '{}'", movie.title)))?;

    Ok(Json(details))
}
