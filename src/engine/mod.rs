pub mod matching;
pub mod tfidf;

use crate::catalog::Catalog;

use tfidf::TfidfVectorizer;

/// Maximum number of neighbors returned for one query
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Precomputed pairwise cosine similarity over the whole catalog
///
/// An N x N symmetric matrix of scores in [0, 1], where entry (i, j) is the
/// cosine similarity between the TF-IDF vectors of movies i and j. Built once
/// at startup and read-only afterwards, so it is safe to share across
/// concurrent requests without locking. Queries only index into it; nothing is
/// ever recomputed per query.
pub struct SimilarityIndex {
    matrix: Vec<Vec<f32>>,
}

impl SimilarityIndex {
    /// Vectorizes every catalog document and computes the full pairwise matrix
    pub fn build(catalog: &Catalog) -> Self {
        let documents: Vec<String> = catalog.movies().iter().map(|m| m.document()).collect();
        let vectors = TfidfVectorizer::new().fit_transform(&documents);

        let n = vectors.len();
        let mut matrix = vec![vec![0.0f32; n]; n];
        for i in 0..n {
            // A movie is maximally similar to itself, except the degenerate
            // all-empty document whose vector has no direction at all.
            matrix[i][i] = if vectors[i].is_empty() { 0.0 } else { 1.0 };
            for j in (i + 1)..n {
                let score = vectors[i].dot(&vectors[j]);
                matrix[i][j] = score;
                matrix[j][i] = score;
            }
        }

        Self { matrix }
    }

    /// Number of movies covered by the matrix
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Similarity row for the movie at `index`
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        self.matrix.get(index).map(|row| row.as_slice())
    }

    pub fn score(&self, i: usize, j: usize) -> Option<f32> {
        self.matrix.get(i).and_then(|row| row.get(j)).copied()
    }
}

/// One ranked neighbor of a resolved movie
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Catalog position of the neighbor
    pub index: usize,
    /// Raw cosine similarity in [0, 1]
    pub score: f32,
}

impl Neighbor {
    /// Display score on a 0-100 scale, rounded to two decimals
    ///
    /// Ranking always uses the raw score; this is presentation only.
    pub fn score_percent(&self) -> f64 {
        (self.score as f64 * 10_000.0).round() / 100.0
    }
}

/// Result of resolving a free-text query against the catalog
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Catalog position of the fuzzy-matched movie
    pub matched_index: usize,
    /// Fuzzy-match ratio of the winning title
    pub match_ratio: f64,
    /// Up to [`MAX_RECOMMENDATIONS`] neighbors, best first
    pub neighbors: Vec<Neighbor>,
}

/// Resolves a free-text title into its ranked neighbors
///
/// A pure function of its inputs: fuzzy-match the query against every catalog
/// title, then rank the matched movie's similarity row descending (ties broken
/// by ascending catalog position), drop the movie itself, and keep the top
/// [`MAX_RECOMMENDATIONS`]. Returns None when no title clears the acceptance
/// threshold; a catalog of one movie yields an empty neighbor list.
pub fn resolve(query: &str, catalog: &Catalog, index: &SimilarityIndex) -> Option<Resolution> {
    let (matched_index, match_ratio) = matching::best_match(query, catalog.titles())?;
    let row = index.row(matched_index)?;

    let mut neighbors: Vec<Neighbor> = row
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != matched_index)
        .map(|(j, &score)| Neighbor { index: j, score })
        .collect();
    neighbors.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.index.cmp(&b.index))
    });
    neighbors.truncate(MAX_RECOMMENDATIONS);

    Some(Resolution {
        matched_index,
        match_ratio,
        neighbors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn catalog_from(rows: &[(&str, &str, &str)]) -> Catalog {
        let mut csv = String::from("title,genres,keywords,tagline,cast,director,release_date\n");
        for (title, genres, keywords) in rows {
            csv.push_str(&format!("{},{},{},,,,\n", title, genres, keywords));
        }
        Catalog::from_reader(csv.as_bytes()).unwrap()
    }

    /// Alpha and Beta share all text, Gamma is disjoint
    fn three_movie_catalog() -> Catalog {
        catalog_from(&[
            ("Alpha", "Action", "hero fight"),
            ("Beta", "Action", "hero fight"),
            ("Gamma", "Drama", "quiet village"),
        ])
    }

    #[test]
    fn test_matrix_dimensions_track_catalog() {
        let catalog = three_movie_catalog();
        let index = SimilarityIndex::build(&catalog);
        assert_eq!(index.len(), catalog.len());
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let catalog = three_movie_catalog();
        let index = SimilarityIndex::build(&catalog);
        for i in 0..catalog.len() {
            for j in 0..catalog.len() {
                assert_eq!(index.score(i, j), index.score(j, i));
            }
        }
    }

    #[test]
    fn test_diagonal_is_one_for_nonempty_documents() {
        let catalog = three_movie_catalog();
        let index = SimilarityIndex::build(&catalog);
        for i in 0..catalog.len() {
            assert_eq!(index.score(i, i), Some(1.0));
        }
    }

    #[test]
    fn test_all_empty_document_is_similar_to_nothing() {
        let catalog = catalog_from(&[("Blank", "", ""), ("Alpha", "Action", "hero")]);
        let index = SimilarityIndex::build(&catalog);
        assert_eq!(index.score(0, 0), Some(0.0));
        assert_eq!(index.score(0, 1), Some(0.0));
    }

    #[test]
    fn test_resolve_fuzzy_match_and_ranking() {
        let catalog = three_movie_catalog();
        let index = SimilarityIndex::build(&catalog);

        let resolution = resolve("Alph", &catalog, &index).unwrap();
        assert_eq!(resolution.matched_index, 0);

        // Beta shares all text with Alpha, Gamma shares none
        assert_eq!(resolution.neighbors.len(), 2);
        assert_eq!(resolution.neighbors[0].index, 1);
        assert!(resolution.neighbors[0].score > 0.99);
        assert_eq!(resolution.neighbors[1].index, 2);
        assert!(resolution.neighbors[1].score < 0.01);
    }

    #[test]
    fn test_resolve_excludes_self() {
        let catalog = three_movie_catalog();
        let index = SimilarityIndex::build(&catalog);
        let resolution = resolve("Alpha", &catalog, &index).unwrap();
        assert!(resolution
            .neighbors
            .iter()
            .all(|n| n.index != resolution.matched_index));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let catalog = three_movie_catalog();
        let index = SimilarityIndex::build(&catalog);
        let first = resolve("Alpha", &catalog, &index).unwrap();
        let second = resolve("Alpha", &catalog, &index).unwrap();
        assert_eq!(first.matched_index, second.matched_index);
        assert_eq!(first.neighbors, second.neighbors);
    }

    #[test]
    fn test_resolve_no_close_match() {
        let catalog = three_movie_catalog();
        let index = SimilarityIndex::build(&catalog);
        assert!(resolve("Zzzzznonexistent", &catalog, &index).is_none());
    }

    #[test]
    fn test_resolve_single_movie_catalog() {
        let catalog = catalog_from(&[("Alpha", "Action", "hero")]);
        let index = SimilarityIndex::build(&catalog);
        let resolution = resolve("Alpha", &catalog, &index).unwrap();
        assert_eq!(resolution.matched_index, 0);
        assert!(resolution.neighbors.is_empty());
    }

    #[test]
    fn test_resolve_empty_catalog() {
        let catalog = Catalog::from_reader(
            "title,genres,keywords,tagline,cast,director,release_date\n".as_bytes(),
        )
        .unwrap();
        let index = SimilarityIndex::build(&catalog);
        assert!(index.is_empty());
        assert!(resolve("Alpha", &catalog, &index).is_none());
    }

    #[test]
    fn test_neighbor_scores_non_increasing_and_capped() {
        let mut rows = Vec::new();
        let titles: Vec<String> = (0..15).map(|i| format!("Movie{:02}", i)).collect();
        for title in &titles {
            rows.push((title.as_str(), "Action", "hero fight"));
        }
        let catalog = catalog_from(&rows);
        let index = SimilarityIndex::build(&catalog);

        let resolution = resolve("Movie00", &catalog, &index).unwrap();
        assert_eq!(resolution.neighbors.len(), MAX_RECOMMENDATIONS);
        for pair in resolution.neighbors.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_score_tie_breaks_by_position() {
        // All four movies share identical documents; every neighbor ties at
        // 1.0 and must come back in catalog order.
        let catalog = catalog_from(&[
            ("One", "Action", "hero"),
            ("Two", "Action", "hero"),
            ("Three", "Action", "hero"),
            ("Four", "Action", "hero"),
        ]);
        let index = SimilarityIndex::build(&catalog);
        let resolution = resolve("Two", &catalog, &index).unwrap();
        let order: Vec<usize> = resolution.neighbors.iter().map(|n| n.index).collect();
        assert_eq!(order, vec![0, 2, 3]);
    }

    #[test]
    fn test_score_percent_rounding() {
        let neighbor = Neighbor {
            index: 0,
            score: 0.123456,
        };
        assert_eq!(neighbor.score_percent(), 12.35);

        let full = Neighbor {
            index: 0,
            score: 1.0,
        };
        assert_eq!(full.score_percent(), 100.0);
    }
}
