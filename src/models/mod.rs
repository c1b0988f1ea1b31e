use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single movie in the catalog
///
/// The catalog position (`index`) is the canonical identifier: it is the row
/// and column of this movie in the similarity matrix and the key used by the
/// favorites list. Text fields are never null; missing source values are
/// substituted with empty strings at load time.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Movie {
    pub index: usize,
    pub title: String,
    pub genres: String,
    pub keywords: String,
    pub tagline: String,
    pub cast: String,
    pub director: String,
    pub release_date: String,
}

impl Movie {
    /// The text blob this movie is vectorized from: the five metadata fields
    /// joined with single spaces, in a fixed order.
    pub fn document(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.genres, self.keywords, self.tagline, self.cast, self.director
        )
    }

    /// Release year parsed from the leading 4 digits of `release_date`
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.get(..4).and_then(|y| y.parse().ok())
    }
}

/// Raw catalog CSV row
///
/// Every field defaults to an empty string so that rows with missing values
/// deserialize cleanly; extra columns in the source file are ignored.
#[derive(Debug, Deserialize)]
pub struct CatalogRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub cast: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub release_date: String,
}

/// Metadata for one movie fetched from the external provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub title: String,
    pub poster_url: String,
    pub release_date: String,
    /// Average rating on a 0-10 scale
    pub rating: f64,
    pub trailer_url: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from GET /search/movie
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbSearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchHit {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
}

/// Response from GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

/// Response from GET /movie/{id}/videos
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideosResponse {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    pub key: String,
    #[serde(rename = "type")]
    pub video_type: String,
    pub site: String,
}

// ============================================================================
// Favorites
// ============================================================================

/// A user's favorites list, stored as catalog positions in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Favorites {
    entries: Vec<usize>,
}

impl Favorites {
    /// Creates an empty favorites list
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a catalog position; returns false if it is already present
    pub fn add(&mut self, index: usize) -> bool {
        if self.entries.contains(&index) {
            return false;
        }
        self.entries.push(index);
        true
    }

    /// Removes a catalog position; returns false if it was not present
    pub fn remove(&mut self, index: usize) -> bool {
        let before = self.entries.len();
        self.entries.retain(|&i| i != index);
        self.entries.len() != before
    }

    /// Clears the whole list
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(index: usize) -> Movie {
        Movie {
            index,
            title: "Inception".to_string(),
            genres: "Action, Science Fiction".to_string(),
            keywords: "dream heist".to_string(),
            tagline: "Your mind is the scene of the crime.".to_string(),
            cast: "Leonardo DiCaprio".to_string(),
            director: "Christopher Nolan".to_string(),
            release_date: "2010-07-16".to_string(),
        }
    }

    #[test]
    fn test_document_field_order() {
        let m = movie(0);
        assert_eq!(
            m.document(),
            "Action, Science Fiction dream heist Your mind is the scene of the crime. \
             Leonardo DiCaprio Christopher Nolan"
        );
    }

    #[test]
    fn test_document_with_empty_fields() {
        let mut m = movie(0);
        m.keywords = String::new();
        m.tagline = String::new();
        assert_eq!(
            m.document(),
            "Action, Science Fiction   Leonardo DiCaprio Christopher Nolan"
        );
    }

    #[test]
    fn test_release_year() {
        let m = movie(0);
        assert_eq!(m.release_year(), Some(2010));
    }

    #[test]
    fn test_release_year_missing() {
        let mut m = movie(0);
        m.release_date = String::new();
        assert_eq!(m.release_year(), None);

        m.release_date = "n/a".to_string();
        assert_eq!(m.release_year(), None);
    }

    #[test]
    fn test_favorites_add() {
        let mut favorites = Favorites::new();
        assert!(favorites.add(3));
        assert_eq!(favorites.entries(), &[3]);
    }

    #[test]
    fn test_favorites_add_duplicate() {
        let mut favorites = Favorites::new();
        assert!(favorites.add(3));
        assert!(!favorites.add(3));
        assert_eq!(favorites.entries().len(), 1);
    }

    #[test]
    fn test_favorites_remove() {
        let mut favorites = Favorites::new();
        favorites.add(1);
        favorites.add(2);
        assert!(favorites.remove(1));
        assert!(!favorites.remove(1));
        assert_eq!(favorites.entries(), &[2]);
    }

    #[test]
    fn test_favorites_preserve_insertion_order() {
        let mut favorites = Favorites::new();
        favorites.add(5);
        favorites.add(1);
        favorites.add(9);
        assert_eq!(favorites.entries(), &[5, 1, 9]);
    }

    #[test]
    fn test_favorites_clear() {
        let mut favorites = Favorites::new();
        favorites.add(1);
        favorites.clear();
        assert!(favorites.is_empty());
    }
}
