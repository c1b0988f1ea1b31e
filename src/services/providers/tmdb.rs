/// TMDB metadata provider
///
/// API Flow:
/// 1. Search: /search/movie?query={title} → first hit's movie id
/// 2. Details: /movie/{id} → poster path, release date, vote average
/// 3. Videos: /movie/{id}/videos → first YouTube trailer key
///
/// A title with no search hit is reported as Ok(None), not an error; the
/// caller decides how to render a movie it has no artwork for.
use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{MovieDetails, TmdbMovieDetails, TmdbSearchResponse, TmdbVideosResponse},
    services::providers::MetadataProvider,
};
use chrono::Utc;
use reqwest::Client as HttpClient;
use std::time::Duration;

const DETAILS_CACHE_TTL: u64 = 604800; // 1 week

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/500x750?text=No+Poster+Available";
const TRAILER_EMBED_BASE_URL: &str = "https://www.youtube.com/embed";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Cache,
}

impl TmdbProvider {
    pub fn new(
        cache: Cache,
        api_key: String,
        api_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key,
            api_url,
            cache,
        })
    }

    /// Resolves a title to a TMDB movie id via search; None when nothing matches
    async fn search_movie_id(&self, title: &str) -> AppResult<Option<u64>> {
        let url = format!("{}/search/movie", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let search: TmdbSearchResponse = response.json().await?;
        Ok(search.results.first().map(|hit| hit.id))
    }

    async fn fetch_details(&self, movie_id: u64) -> AppResult<TmdbMovieDetails> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    /// Fetches the embed URL of the first YouTube trailer, if any
    async fn fetch_trailer(&self, movie_id: u64) -> AppResult<Option<String>> {
        let url = format!("{}/movie/{}/videos", self.api_url, movie_id);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let videos: TmdbVideosResponse = response.json().await?;
        let key = videos
            .results
            .iter()
            .find(|v| v.video_type == "Trailer" && v.site == "YouTube")
            .map(|v| v.key.clone());

        Ok(key.map(|k| format!("{}/{}", TRAILER_EMBED_BASE_URL, k)))
    }

    fn convert_api_response(
        &self,
        query_title: &str,
        details: TmdbMovieDetails,
        trailer_url: Option<String>,
    ) -> MovieDetails {
        let poster_url = match details.poster_path {
            Some(ref path) if !path.is_empty() => format!("{}{}", POSTER_BASE_URL, path),
            _ => PLACEHOLDER_POSTER_URL.to_string(),
        };

        MovieDetails {
            title: details.title.unwrap_or_else(|| query_title.to_string()),
            poster_url,
            release_date: details.release_date.unwrap_or_default(),
            rating: details.vote_average,
            trailer_url,
            fetched_at: Utc::now(),
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn movie_details(&self, title: &str) -> AppResult<Option<MovieDetails>> {
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Lookup title cannot be empty".to_string(),
            ));
        }

        cached!(
            self.cache,
            CacheKey::MovieDetails(title.to_string()),
            DETAILS_CACHE_TTL,
            async move {
                let Some(movie_id) = self.search_movie_id(title).await? else {
                    tracing::info!(title = %title, provider = "tmdb", "No metadata match");
                    return Ok::<Option<MovieDetails>, AppError>(None);
                };

                let details = self.fetch_details(movie_id).await?;
                let trailer_url = self.fetch_trailer(movie_id).await?;
                let movie_details = self.convert_api_response(title, details, trailer_url);

                tracing::info!(
                    title = %title,
                    movie_id,
                    has_trailer = movie_details.trailer_url.is_some(),
                    provider = "tmdb",
                    "Metadata fetched"
                );

                Ok(Some(movie_details))
            }
        )
    }

    fn clone_for_task(&self) -> Box<dyn MetadataProvider> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
