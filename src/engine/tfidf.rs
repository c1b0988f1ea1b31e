use std::collections::HashMap;

use regex::Regex;

/// Sparse document vector: parallel arrays of term ids and weights, term ids
/// strictly ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<u32>,
    values: Vec<f32>,
}

impl SparseVector {
    /// Dot product via a merge walk over the sorted term ids
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let mut sum = 0.0f32;
        let (mut i, mut j) = (0, 0);
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
            }
        }
        sum
    }

    fn l2_normalize(&mut self) {
        let norm: f32 = self.values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
    }

    /// True when the document produced no tokens
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Corpus-wide TF-IDF vectorizer
///
/// Tokens are lowercased runs of two or more word characters. Weighting is raw
/// term frequency times smoothed inverse document frequency,
/// `ln((1 + n) / (1 + df)) + 1`, and every vector is L2-normalized so cosine
/// similarity reduces to a sparse dot product.
///
/// The vocabulary is derived from the corpus alone, with term ids assigned in
/// first-seen order over the documents. Fitting the same corpus twice yields
/// identical vectors.
pub struct TfidfVectorizer {
    token_re: Regex,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            // Same shape as the conventional vectorizer token pattern: \b\w\w+\b
            token_re: Regex::new(r"\b\w\w+\b").expect("token pattern is valid"),
        }
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token_re
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Vectorizes the whole corpus in one pass
    pub fn fit_transform(&self, documents: &[String]) -> Vec<SparseVector> {
        let mut vocabulary: HashMap<String, u32> = HashMap::new();
        let mut doc_freq: Vec<u32> = Vec::new();
        let mut doc_counts: Vec<HashMap<u32, u32>> = Vec::with_capacity(documents.len());

        for document in documents {
            let mut counts: HashMap<u32, u32> = HashMap::new();
            for token in self.tokenize(document) {
                let next_id = vocabulary.len() as u32;
                let term_id = *vocabulary.entry(token).or_insert(next_id);
                if term_id as usize == doc_freq.len() {
                    doc_freq.push(0);
                }
                *counts.entry(term_id).or_insert(0) += 1;
            }
            for &term_id in counts.keys() {
                doc_freq[term_id as usize] += 1;
            }
            doc_counts.push(counts);
        }

        let total_docs = documents.len() as f32;
        let idf: Vec<f32> = doc_freq
            .iter()
            .map(|&df| ((1.0 + total_docs) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        doc_counts
            .into_iter()
            .map(|counts| {
                let mut terms: Vec<(u32, u32)> = counts.into_iter().collect();
                terms.sort_unstable_by_key(|&(term_id, _)| term_id);

                let mut vector = SparseVector {
                    indices: terms.iter().map(|&(term_id, _)| term_id).collect(),
                    values: terms
                        .iter()
                        .map(|&(term_id, tf)| tf as f32 * idf[term_id as usize])
                        .collect(),
                };
                vector.l2_normalize();
                vector
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tokenize_lowercases_and_drops_single_chars() {
        let vectorizer = TfidfVectorizer::new();
        assert_eq!(
            vectorizer.tokenize("A Quiet Place 2"),
            vec!["quiet".to_string(), "place".to_string()]
        );
    }

    #[test]
    fn test_identical_documents_have_unit_similarity() {
        let vectorizer = TfidfVectorizer::new();
        let vectors = vectorizer.fit_transform(&docs(&["action hero fight", "action hero fight"]));
        let score = vectors[0].dot(&vectors[1]);
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_disjoint_documents_have_zero_similarity() {
        let vectorizer = TfidfVectorizer::new();
        let vectors = vectorizer.fit_transform(&docs(&["action hero", "quiet village drama"]));
        assert_eq!(vectors[0].dot(&vectors[1]), 0.0);
    }

    #[test]
    fn test_empty_document_yields_empty_vector() {
        let vectorizer = TfidfVectorizer::new();
        let vectors = vectorizer.fit_transform(&docs(&["", "action hero"]));
        assert!(vectors[0].is_empty());
        assert_eq!(vectors[0].dot(&vectors[1]), 0.0);
        assert_eq!(vectors[0].dot(&vectors[0]), 0.0);
    }

    #[test]
    fn test_partial_overlap_between_zero_and_one() {
        let vectorizer = TfidfVectorizer::new();
        let vectors =
            vectorizer.fit_transform(&docs(&["action hero fight", "action hero romance"]));
        let score = vectors[0].dot(&vectors[1]);
        assert!(score > 0.0);
        assert!(score < 1.0);
    }

    #[test]
    fn test_fit_transform_is_deterministic() {
        let corpus = docs(&["action hero fight", "quiet drama", "action drama village"]);
        let vectorizer = TfidfVectorizer::new();
        let first = vectorizer.fit_transform(&corpus);
        let second = vectorizer.fit_transform(&corpus);
        assert_eq!(first, second);
    }

    #[test]
    fn test_rare_terms_weigh_more_than_common_ones() {
        // "action" appears in every document, "heist" in one; in a document
        // containing both once, the rare term must carry more weight.
        let vectorizer = TfidfVectorizer::new();
        let vectors = vectorizer.fit_transform(&docs(&[
            "action heist",
            "action drama",
            "action romance",
        ]));
        let v = &vectors[0];
        assert_eq!(v.indices.len(), 2);
        let action_weight = v.values[0];
        let heist_weight = v.values[1];
        assert!(heist_weight > action_weight);
    }

    #[test]
    fn test_empty_corpus() {
        let vectorizer = TfidfVectorizer::new();
        let vectors = vectorizer.fit_transform(&[]);
        assert!(vectors.is_empty());
    }
}
