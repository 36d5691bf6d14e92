//! Value types shared by every stage of the similarity pipeline.

use data_loader::MovieId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Unordered pair of distinct movies, stored with the smaller id first.
///
/// The fields are private so a key can only come from one of the
/// constructors below, which keep `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MoviePairKey {
    first: MovieId,
    second: MovieId,
}

impl MoviePairKey {
    /// Key for `(x, y)` only if it is already in canonical order.
    ///
    /// The pair generator uses this: the mirrored combination `(y, x)` is
    /// produced too, so dropping non-canonical ones emits every pair once.
    /// Self-pairs return `None`.
    pub fn canonical(x: MovieId, y: MovieId) -> Option<Self> {
        (x < y).then_some(Self { first: x, second: y })
    }

    /// Key for two movies in either order. `None` when `x == y`.
    pub fn unordered(x: MovieId, y: MovieId) -> Option<Self> {
        match x.cmp(&y) {
            Ordering::Less => Some(Self { first: x, second: y }),
            Ordering::Greater => Some(Self { first: y, second: x }),
            Ordering::Equal => None,
        }
    }

    pub fn first(&self) -> MovieId {
        self.first
    }

    pub fn second(&self) -> MovieId {
        self.second
    }

    pub fn contains(&self, movie_id: MovieId) -> bool {
        self.first == movie_id || self.second == movie_id
    }

    /// The member of the pair that isn't `movie_id`, or `None` if
    /// `movie_id` is not in the pair.
    pub fn other(&self, movie_id: MovieId) -> Option<MovieId> {
        if self.first == movie_id {
            Some(self.second)
        } else if self.second == movie_id {
            Some(self.first)
        } else {
            None
        }
    }
}

/// Ratings one user gave to the two movies of a pair, in key order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingPair {
    pub rating_a: f32,
    pub rating_b: f32,
}

impl RatingPair {
    pub fn new(rating_a: f32, rating_b: f32) -> Self {
        Self { rating_a, rating_b }
    }
}

/// Similarity of one movie pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Cosine similarity in [-1, 1]; 0 when either rating vector is all zero
    pub score: f64,
    /// Number of rating pairs (common raters) behind the score
    pub strength: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_rejects_reversed_and_self_pairs() {
        assert_eq!(
            MoviePairKey::canonical(1, 2).map(|k| (k.first(), k.second())),
            Some((1, 2))
        );
        assert!(MoviePairKey::canonical(2, 1).is_none());
        assert!(MoviePairKey::canonical(3, 3).is_none());
    }

    #[test]
    fn test_unordered_normalizes() {
        assert_eq!(MoviePairKey::unordered(9, 4), MoviePairKey::unordered(4, 9));
        assert!(MoviePairKey::unordered(4, 4).is_none());
    }

    #[test]
    fn test_other_member() {
        let key = MoviePairKey::canonical(10, 20).unwrap();
        assert!(key.contains(10));
        assert!(key.contains(20));
        assert!(!key.contains(30));
        assert_eq!(key.other(10), Some(20));
        assert_eq!(key.other(20), Some(10));
        assert_eq!(key.other(30), None);
    }
}
