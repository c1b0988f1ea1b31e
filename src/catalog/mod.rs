use std::io::Read;
use std::path::Path;

use crate::error::AppResult;
use crate::models::{CatalogRecord, Movie};

/// Ordered, position-indexed movie catalog
///
/// Built once at startup and immutable afterwards: every downstream component
/// (similarity matrix, resolver, favorites) refers to movies by their position
/// in this sequence.
#[derive(Debug, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    /// Loads the catalog from a CSV file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path.as_ref())?;
        Self::read_from(reader)
    }

    /// Loads the catalog from any CSV reader
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        Self::read_from(reader)
    }

    fn read_from<R: Read>(mut reader: csv::Reader<R>) -> AppResult<Self> {
        let mut movies = Vec::new();
        let mut skipped = 0usize;

        for result in reader.deserialize::<CatalogRecord>() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(error = %e, "Skipping malformed catalog row");
                    continue;
                }
            };

            // A row without a title cannot be matched against queries
            if record.title.trim().is_empty() {
                skipped += 1;
                tracing::warn!(row = movies.len() + skipped, "Skipping catalog row without a title");
                continue;
            }

            movies.push(Movie {
                index: movies.len(),
                title: record.title,
                genres: record.genres,
                keywords: record.keywords,
                tagline: record.tagline,
                cast: record.cast,
                director: record.director,
                release_date: record.release_date,
            });
        }

        if skipped > 0 {
            tracing::warn!(skipped, loaded = movies.len(), "Catalog rows skipped during load");
        }

        Ok(Self { movies })
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Movie at the given catalog position
    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// All titles, in catalog order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|m| m.title.as_str())
    }
}
