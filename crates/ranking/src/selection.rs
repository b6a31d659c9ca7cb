//! Selection primitives: bounded top-K by rating and title prefix search.

use catalog::Movie;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::debug;

/// Heap slot ordered from worst to best: lower rating first, then later position
#[derive(Debug, Clone, Copy)]
struct RatedSlot {
    rating: f32,
    position: usize,
}

impl PartialEq for RatedSlot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RatedSlot {}

impl PartialOrd for RatedSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RatedSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rating
            .total_cmp(&other.rating)
            .then_with(|| other.position.cmp(&self.position))
    }
}

fn heap_rating(movie: &Movie) -> f32 {
    if movie.rating.is_finite() {
        movie.rating
    } else {
        0.0
    }
}

/// The `k` highest-rated movies, best first.
///
/// Keeps a min-root heap of at most `k` slots; the root is replaced only when
/// a later movie rates strictly higher, so among equal ratings the earlier
/// movie wins. O(n log k).
pub fn top_k_by_rating(collection: &[Movie], k: usize) -> Vec<&Movie> {
    if k == 0 || collection.is_empty() {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<RatedSlot>> = BinaryHeap::with_capacity(k.min(collection.len()));
    for (position, movie) in collection.iter().enumerate() {
        let slot = RatedSlot {
            rating: heap_rating(movie),
            position,
        };
        if heap.len() < k {
            heap.push(Reverse(slot));
        } else if let Some(mut root) = heap.peek_mut() {
            if slot.rating > root.0.rating {
                // PeekMut sifts down when dropped
                *root = Reverse(slot);
            }
        }
    }

    // Ascending Reverse order is descending slot order: best first
    let selected: Vec<&Movie> = heap
        .into_sorted_vec()
        .into_iter()
        .map(|Reverse(slot)| &collection[slot.position])
        .collect();
    debug!("Selected top {} of {} by rating", selected.len(), collection.len());
    selected
}

/// Full O(n log n) sort by rating, best first; baseline for `top_k_by_rating`
pub fn sort_by_rating(collection: &[Movie], k: usize) -> Vec<&Movie> {
    let mut sorted: Vec<&Movie> = collection.iter().collect();
    sorted.sort_by(|a, b| heap_rating(b).total_cmp(&heap_rating(a)));
    sorted.truncate(k);
    sorted
}

/// Every movie whose title case-insensitively starts with `query`, in title order.
///
/// Sorts a copy by lowercased title, binary searches the lower bound and scans
/// forward while the prefix still matches. An empty query returns the
/// collection unchanged.
pub fn prefix_search<'a>(collection: &'a [Movie], query: &str) -> Vec<&'a Movie> {
    if query.is_empty() {
        return collection.iter().collect();
    }

    let needle = query.to_lowercase();
    let mut keyed: Vec<(String, &Movie)> = collection
        .iter()
        .map(|movie| (movie.title_key(), movie))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    let start = keyed.partition_point(|(key, _)| key.as_str() < needle.as_str());
    keyed[start..]
        .iter()
        .take_while(|(key, _)| key.starts_with(&needle))
        .map(|(_, movie)| *movie)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(id: &str, rating: f32) -> Movie {
        Movie::new(id, id).with_rating(rating)
    }

    fn ids(movies: &[&Movie]) -> Vec<String> {
        movies.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn test_top_k_basic() {
        let collection = vec![
            rated("a", 5.0),
            rated("b", 9.0),
            rated("c", 7.0),
            rated("d", 8.0),
        ];
        assert_eq!(ids(&top_k_by_rating(&collection, 2)), vec!["b", "d"]);
    }

    #[test]
    fn test_top_k_edge_cases() {
        let collection = vec![rated("a", 5.0), rated("b", 9.0)];
        assert!(top_k_by_rating(&collection, 0).is_empty());
        assert!(top_k_by_rating(&[], 3).is_empty());
        assert_eq!(ids(&top_k_by_rating(&collection, 10)), vec!["b", "a"]);
    }

    #[test]
    fn test_top_k_ties_prefer_earlier() {
        let collection = vec![
            rated("a", 7.0),
            rated("b", 7.0),
            rated("c", 7.0),
            rated("d", 6.0),
        ];
        assert_eq!(ids(&top_k_by_rating(&collection, 2)), vec!["a", "b"]);
        assert_eq!(ids(&sort_by_rating(&collection, 2)), vec!["a", "b"]);
    }

    #[test]
    fn test_top_k_nan_rating_is_lowest() {
        let collection = vec![rated("nan", f32::NAN), rated("low", 1.0)];
        assert_eq!(ids(&top_k_by_rating(&collection, 1)), vec!["low"]);
    }

    #[test]
    fn test_prefix_search() {
        let collection = vec![
            Movie::new("3", "Interstellar"),
            Movie::new("1", "Inception"),
            Movie::new("2", "Titanic"),
            Movie::new("4", "inside out"),
        ];
        let titles: Vec<&str> = prefix_search(&collection, "IN")
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Inception", "inside out", "Interstellar"]);
    }

    #[test]
    fn test_prefix_search_empty_query_is_identity() {
        let collection = vec![Movie::new("b", "Beta"), Movie::new("a", "Alpha")];
        assert_eq!(ids(&prefix_search(&collection, "")), vec!["b", "a"]);
    }

    #[test]
    fn test_prefix_search_no_match() {
        let collection = vec![Movie::new("a", "Alpha")];
        assert!(prefix_search(&collection, "zzz").is_empty());
        assert!(prefix_search(&collection, "Alphabet").is_empty());
    }
}
