/// Acceptance threshold for fuzzy title matches
///
/// Candidates scoring below this are treated as no match at all, so a garbled
/// query resolves to "not found" instead of a random title.
pub const MATCH_THRESHOLD: f64 = 0.6;

/// Normalized similarity between two strings in [0, 1]
///
/// Defined as `2 * LCS(a, b) / (|a| + |b|)` over lowercased characters: the
/// ratio of the longest common subsequence to the combined length. 1.0 means
/// the strings are equal ignoring case; 0.0 means no characters in common.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * lcs_len(&a, &b) as f64 / total as f64
}

/// Longest common subsequence length, two-row dynamic programming
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Finds the candidate most similar to `query`
///
/// Returns the candidate position and its ratio, or None when no candidate
/// reaches [`MATCH_THRESHOLD`]. Equal ratios keep the earliest position, so
/// resolution is deterministic even with duplicate titles.
pub fn best_match<'a, I>(query: &str, candidates: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(usize, f64)> = None;
    for (position, candidate) in candidates.into_iter().enumerate() {
        let ratio = similarity_ratio(query, candidate);
        if ratio >= MATCH_THRESHOLD && best.map_or(true, |(_, r)| ratio > r) {
            best = Some((position, ratio));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_one() {
        assert_eq!(similarity_ratio("Inception", "Inception"), 1.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(similarity_ratio("INCEPTION", "inception"), 1.0);
    }

    #[test]
    fn test_prefix_ratio() {
        // LCS("alph", "alpha") = 4, lengths 4 + 5
        let ratio = similarity_ratio("Alph", "Alpha");
        assert!((ratio - 8.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_is_zero() {
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_both_empty_is_one() {
        assert_eq!(similarity_ratio("", ""), 1.0);
    }

    #[test]
    fn test_one_empty_is_zero() {
        assert_eq!(similarity_ratio("", "Alpha"), 0.0);
    }

    #[test]
    fn test_best_match_picks_closest() {
        let titles = ["Alpha", "Beta", "Gamma"];
        let (position, ratio) = best_match("Alph", titles).unwrap();
        assert_eq!(position, 0);
        assert!(ratio >= MATCH_THRESHOLD);
    }

    #[test]
    fn test_best_match_below_threshold_is_none() {
        let titles = ["Alpha", "Beta", "Gamma"];
        assert_eq!(best_match("Zzzzznonexistent", titles), None);
    }

    #[test]
    fn test_best_match_tie_keeps_earliest() {
        // Duplicate titles tie exactly; the earlier catalog position wins.
        let titles = ["Alpha", "Alpha"];
        let (position, ratio) = best_match("Alpha", titles).unwrap();
        assert_eq!(position, 0);
        assert_eq!(ratio, 1.0);
    }

    #[test]
    fn test_best_match_empty_candidates() {
        assert_eq!(best_match("Alpha", std::iter::empty::<&str>()), None);
    }
}
