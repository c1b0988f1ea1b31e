use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    services::recommendations::{self, Recommendation},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Free-text movie title
    pub title: String,
}

/// One recommended movie as returned to the client
#[derive(Debug, Serialize)]
pub struct RecommendedMovie {
    pub title: String,
    pub genres: String,
    pub director: String,
    /// Catalog position of this movie
    pub position: usize,
    /// Similarity on a 0-100 scale, rounded to two decimals
    pub similarity: f64,
    pub poster: Option<String>,
    pub release_date: Option<String>,
    pub rating: Option<f64>,
    pub trailer: Option<String>,
}

impl From<Recommendation> for RecommendedMovie {
    fn from(rec: Recommendation) -> Self {
        let (poster, release_date, rating, trailer) = match rec.details {
            Some(details) => (
                Some(details.poster_url),
                Some(details.release_date),
                Some(details.rating),
                details.trailer_url,
            ),
            None => (None, None, None, None),
        };

        Self {
            title: rec.movie.title,
            genres: rec.movie.genres,
            director: rec.movie.director,
            position: rec.movie.index,
            similarity: rec.similarity,
            poster,
            release_date,
            rating,
            trailer,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    /// Catalog title the query was fuzzy-matched to
    pub matched_title: String,
    pub matched_index: usize,
    pub recommendations: Vec<RecommendedMovie>,
}

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        query = %params.title,
        "Processing recommendation request"
    );

    let result = recommendations::recommend(
        &state.catalog,
        &state.index,
        state.provider.clone(),
        &params.title,
    )
    .await?;

    Ok(Json(RecommendationResponse {
        matched_title: result.matched_title,
        matched_index: result.matched_index,
        recommendations: result
            .items
            .into_iter()
            .map(RecommendedMovie::from)
            .collect(),
    }))
}
