//! Near-miss suggestions for unknown service bindings

use strsim::levenshtein;

/// A fuzzy match suggestion with candidate name and edit distance.
#[derive(Debug, Clone)]
pub struct Suggestion {
    pub candidate: String,
    pub distance: usize,
}

/// Suggest similar binding names from a list of candidates.
///
/// Returns candidates sorted by edit distance (closest first). Exact
/// matches are excluded; case-insensitive matches get distance 0, substring
/// matches distance 1, and Levenshtein matches their actual edit distance.
pub fn suggest_similar(name: &str, candidates: &[&str], max_distance: usize) -> Vec<Suggestion> {
    let name_lower = name.to_lowercase();
    let mut suggestions: Vec<Suggestion> = candidates
        .iter()
        .filter_map(|&candidate| {
            if candidate == name {
                return None;
            }
            let candidate_lower = candidate.to_lowercase();
            if candidate_lower == name_lower {
                return Some(Suggestion {
                    candidate: candidate.to_string(),
                    distance: 0,
                });
            }
            if candidate_lower.contains(&name_lower) || name_lower.contains(&candidate_lower) {
                return Some(Suggestion {
                    candidate: candidate.to_string(),
                    distance: 1,
                });
            }
            let dist = levenshtein(name, candidate);
            if dist <= max_distance {
                Some(Suggestion {
                    candidate: candidate.to_string(),
                    distance: dist,
                })
            } else {
                None
            }
        })
        .collect();
    suggestions.sort_by_key(|s| s.distance);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggests_closest_binding() {
        let candidates = ["accounts", "billing", "inventory"];
        let suggestions = suggest_similar("acounts", &candidates, 3);
        assert!(!suggestions.is_empty());
        assert_eq!(suggestions[0].candidate, "accounts");
    }

    #[test]
    fn test_case_insensitive_is_distance_zero() {
        let candidates = ["Accounts", "billing"];
        let suggestions = suggest_similar("accounts", &candidates, 3);
        assert_eq!(suggestions[0].candidate, "Accounts");
        assert_eq!(suggestions[0].distance, 0);
    }

    #[test]
    fn test_exact_match_excluded() {
        let candidates = ["accounts"];
        let suggestions = suggest_similar("accounts", &candidates, 3);
        assert!(suggestions.is_empty(), "exact matches should be excluded");
    }

    #[test]
    fn test_distance_cap() {
        let candidates = ["zzzzzzzz"];
        let suggestions = suggest_similar("accounts", &candidates, 3);
        assert!(suggestions.is_empty());
    }
}
