//! Label-set similarity.
//!
//! ## Algorithm
//! Jaccard similarity = |intersection| / |union|, over case-insensitive,
//! de-duplicated labels. Two empty sets score 0: missing information
//! neither helps nor penalizes a candidate.

use catalog::LabelSet;
use std::collections::HashSet;

/// Jaccard similarity of two label sets, in `[0, 1]`
pub fn jaccard(a: &LabelSet, b: &LabelSet) -> f32 {
    jaccard_keys(&a.keys(), &b.keys())
}

/// Jaccard similarity over already-lowercased keys.
///
/// Used in the scoring loop so each candidate's keys are built once.
pub fn jaccard_keys(a: &HashSet<String>, b: &HashSet<String>) -> f32 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count() as f32;
    let union = (a.len() + b.len()) as f32 - intersection;
    if union == 0.0 { 0.0 } else { intersection / union }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> LabelSet {
        LabelSet::from_labels(items)
    }

    #[test]
    fn test_identical_sets() {
        let a = labels(&["Sci-Fi", "Thriller"]);
        assert_eq!(jaccard(&a, &a), 1.0);
    }

    #[test]
    fn test_both_empty_is_zero() {
        assert_eq!(jaccard(&LabelSet::new(), &LabelSet::new()), 0.0);
    }

    #[test]
    fn test_one_empty_is_zero() {
        assert_eq!(jaccard(&labels(&["Drama"]), &LabelSet::new()), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let a = labels(&["Action", "Crime", "Drama"]);
        let b = labels(&["drama", "ACTION", "War", "History"]);
        // {action, drama} / {action, crime, drama, war, history}
        assert!((jaccard(&a, &b) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_symmetric() {
        let a = labels(&["Action", "Crime"]);
        let b = labels(&["Crime"]);
        assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
        assert_eq!(jaccard(&a, &b), 0.5);
    }
}
