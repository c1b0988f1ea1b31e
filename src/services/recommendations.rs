use std::sync::Arc;

use crate::{
    catalog::Catalog,
    engine::{self, SimilarityIndex},
    error::{AppError, AppResult},
    models::{Movie, MovieDetails},
    services::providers::MetadataProvider,
};

/// One recommended movie with its display score and optional enrichment
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub movie: Movie,
    /// Similarity on a 0-100 scale, rounded to two decimals
    pub similarity: f64,
    pub details: Option<MovieDetails>,
}

/// The full answer to one recommendation query
#[derive(Debug, Clone)]
pub struct Recommendations {
    pub matched_title: String,
    pub matched_index: usize,
    pub items: Vec<Recommendation>,
}

/// Resolves a free-text title and enriches the ranked neighbors
///
/// The similarity ranking is computed first and stands on its own; metadata
/// lookups run afterwards in parallel and a failed lookup only leaves that
/// item without details.
pub async fn recommend(
    catalog: &Catalog,
    index: &SimilarityIndex,
    provider: Arc<dyn MetadataProvider>,
    query: &str,
) -> AppResult<Recommendations> {
    if query.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter a movie name".to_string(),
        ));
    }

    let resolution = engine::resolve(query, catalog, index).ok_or_else(|| {
        AppError::NotFound("No close match found. Please try another movie name".to_string())
    })?;

    let matched = catalog
        .get(resolution.matched_index)
        .ok_or_else(|| AppError::Internal("Matched index out of catalog bounds".to_string()))?;

    let titles: Vec<String> = resolution
        .neighbors
        .iter()
        .filter_map(|n| catalog.get(n.index).map(|m| m.title.clone()))
        .collect();
    let details = provider.movie_details_batch(titles).await;

    let items: Vec<Recommendation> = resolution
        .neighbors
        .iter()
        .zip(details)
        .filter_map(|(neighbor, details)| {
            catalog.get(neighbor.index).map(|movie| Recommendation {
                movie: movie.clone(),
                similarity: neighbor.score_percent(),
                details,
            })
        })
        .collect();

    tracing::info!(
        query = %query,
        matched_title = %matched.title,
        matched_index = resolution.matched_index,
        match_ratio = resolution.match_ratio,
        results = items.len(),
        provider = provider.name(),
        "Recommendations resolved"
    );

    Ok(Recommendations {
        matched_title: matched.title.clone(),
        matched_index: resolution.matched_index,
        items,
    })
}
