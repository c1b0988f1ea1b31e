use serde::Serialize;
use std::collections::BTreeSet;

use crate::{catalog::Catalog, models::Movie};

/// Default page size when the client does not ask for one
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Upper bound on a single page
pub const MAX_PAGE_SIZE: usize = 100;

/// Catalog browse filters, combined with AND
#[derive(Debug, Clone, Default)]
pub struct BrowseFilter {
    /// Comma-separated genre set, compared order-insensitively
    pub genre: Option<String>,
    /// Exact director name
    pub director: Option<String>,
    /// Inclusive lower bound on the release year
    pub year_from: Option<i32>,
    /// Inclusive upper bound on the release year
    pub year_to: Option<i32>,
    pub offset: usize,
    pub limit: usize,
}

/// One page of filtered catalog movies
#[derive(Debug, Clone)]
pub struct BrowsePage {
    /// Total matches before pagination
    pub total: usize,
    pub movies: Vec<Movie>,
}

/// Distinct values available for the browse dropdowns
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilterValues {
    pub genres: Vec<String>,
    pub directors: Vec<String>,
}

/// Genre strings are compared as sets: "Drama, Action" and "Action, Drama"
/// describe the same movie.
fn normalize_genres(genres: &str) -> String {
    let mut parts: Vec<&str> = genres
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    parts.sort_unstable();
    parts.join(" ")
}

fn matches(movie: &Movie, filter: &BrowseFilter) -> bool {
    if let Some(ref genre) = filter.genre {
        if normalize_genres(&movie.genres) != normalize_genres(genre) {
            return false;
        }
    }

    if let Some(ref director) = filter.director {
        if &movie.director != director {
            return false;
        }
    }

    if filter.year_from.is_some() || filter.year_to.is_some() {
        let Some(year) = movie.release_year() else {
            return false;
        };
        if filter.year_from.is_some_and(|from| year < from) {
            return false;
        }
        if filter.year_to.is_some_and(|to| year > to) {
            return false;
        }
    }

    true
}

/// Filters the catalog and returns one page of results in catalog order
pub fn browse(catalog: &Catalog, filter: &BrowseFilter) -> BrowsePage {
    let limit = filter.limit.clamp(1, MAX_PAGE_SIZE);

    let matching: Vec<&Movie> = catalog
        .movies()
        .iter()
        .filter(|movie| matches(movie, filter))
        .collect();

    let movies = matching
        .iter()
        .skip(filter.offset)
        .take(limit)
        .map(|&movie| movie.clone())
        .collect();

    BrowsePage {
        total: matching.len(),
        movies,
    }
}

/// Collects the sorted distinct genre combinations and directors
pub fn filter_values(catalog: &Catalog) -> FilterValues {
    let mut genres = BTreeSet::new();
    let mut directors = BTreeSet::new();

    for movie in catalog.movies() {
        let normalized = normalize_genres(&movie.genres);
        if !normalized.is_empty() {
            genres.insert(normalized);
        }
        if !movie.director.is_empty() {
            directors.insert(movie.director.clone());
        }
    }

    FilterValues {
        genres: genres.into_iter().collect(),
        directors: directors.into_iter().collect(),
    }
}
