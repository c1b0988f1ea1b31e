/// Movie metadata provider abstraction
///
/// This module provides a pluggable architecture for external movie metadata
/// sources (TMDB today). A provider turns a movie title into poster, release
/// date, rating, and trailer information for display alongside the ranked
/// recommendations.
use crate::{error::AppResult, models::MovieDetails};

pub mod tmdb;

/// Trait for movie metadata providers
///
/// Lookups are keyed by title string. A provider distinguishes "the lookup
/// failed" (an error) from "the provider knows no such movie" (Ok(None));
/// callers treat both as missing detail fields, because enrichment must never
/// invalidate a similarity ranking that has already been computed.
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch display metadata for one movie title
    ///
    /// Returns Ok(None) when the provider has no match for the title.
    async fn movie_details(&self, title: &str) -> AppResult<Option<MovieDetails>>;

    /// Fetch metadata for multiple titles in parallel
    ///
    /// Default implementation spawns one lookup per title and preserves input
    /// order in the output, so results line up with the ranked neighbor list.
    /// A failed lookup yields None for that slot and is logged; it never
    /// aborts the batch.
    async fn movie_details_batch(&self, titles: Vec<String>) -> Vec<Option<MovieDetails>> {
        let mut tasks = Vec::with_capacity(titles.len());

        for title in titles {
            let provider = self.clone_for_task();
            let task = tokio::spawn(async move { provider.movie_details(&title).await });
            tasks.push(task);
        }

        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(Ok(details)) => results.push(details),
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "Metadata fetch failed for title");
                    results.push(None);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Task join error");
                    results.push(None);
                }
            }
        }

        let missing = results.iter().filter(|r| r.is_none()).count();
        if missing > 0 {
            tracing::warn!(
                success_count = results.len() - missing,
                missing_count = missing,
                "Partial metadata fetch failure"
            );
        }

        results
    }

    /// Clone provider for parallel task execution
    ///
    /// Required because providers need to be moved into tokio tasks.
    fn clone_for_task(&self) -> Box<dyn MetadataProvider>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
