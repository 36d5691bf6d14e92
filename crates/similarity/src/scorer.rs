//! Similarity scoring of a movie pair's rating pairs.
//!
//! ## Algorithm
//! Cosine similarity of the two rating vectors induced by the common raters:
//!
//! ```text
//! score = Σ x·y / (sqrt(Σ x²) · sqrt(Σ y²))
//! ```
//!
//! No mean centering is applied. A zero denominator gives a score of 0.

use crate::types::{RatingPair, SimilarityResult};

/// Reduces the rating pairs of one movie pair to a single result.
///
/// `Send + Sync` so a measure can be shared by the parallel table builder.
pub trait SimilarityMeasure: Send + Sync {
    /// Name of this measure (for logging)
    fn name(&self) -> &str;

    /// Score one movie pair from all of its rating pairs.
    fn score(&self, pairs: &[RatingPair]) -> SimilarityResult;
}

/// Running sums for a cosine similarity.
///
/// Sums are kept in `f64` regardless of the `f32` input ratings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineAccumulator {
    sum_xx: f64,
    sum_yy: f64,
    sum_xy: f64,
    count: u32,
}

impl CosineAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pair: RatingPair) {
        let x = f64::from(pair.rating_a);
        let y = f64::from(pair.rating_b);
        self.sum_xx += x * x;
        self.sum_yy += y * y;
        self.sum_xy += x * y;
        self.count += 1;
    }

    pub fn finish(self) -> SimilarityResult {
        let denominator = self.sum_xx.sqrt() * self.sum_yy.sqrt();
        let score = if denominator != 0.0 {
            self.sum_xy / denominator
        } else {
            0.0
        };

        SimilarityResult {
            score,
            strength: self.count,
        }
    }
}

impl Extend<RatingPair> for CosineAccumulator {
    fn extend<T: IntoIterator<Item = RatingPair>>(&mut self, iter: T) {
        for pair in iter {
            self.push(pair);
        }
    }
}

/// Plain cosine similarity over rating vectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineSimilarity;

impl SimilarityMeasure for CosineSimilarity {
    fn name(&self) -> &str {
        "cosine"
    }

    fn score(&self, pairs: &[RatingPair]) -> SimilarityResult {
        cosine_similarity(pairs)
    }
}

/// Cosine similarity and strength for a set of rating pairs.
pub fn cosine_similarity(pairs: &[RatingPair]) -> SimilarityResult {
    let mut acc = CosineAccumulator::new();
    acc.extend(pairs.iter().copied());
    acc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(values: &[(f32, f32)]) -> Vec<RatingPair> {
        values.iter().map(|&(a, b)| RatingPair::new(a, b)).collect()
    }

    #[test]
    fn test_reference_scenario() {
        // sum_xx = 51, sum_yy = 75, sum_xy = 55
        let result = cosine_similarity(&pairs(&[(5.0, 5.0), (5.0, 5.0), (1.0, 5.0)]));

        let expected = 55.0 / (51.0f64 * 75.0).sqrt();
        assert!((result.score - expected).abs() < 1e-12);
        assert!((result.score - 0.889).abs() < 1e-3);
        assert_eq!(result.strength, 3);
    }

    #[test]
    fn test_identical_vectors_score_one() {
        let x = [(1.0, 1.0), (4.0, 4.0), (2.5, 2.5), (5.0, 5.0)];
        let result = cosine_similarity(&pairs(&x));
        assert!((result.score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale_invariance() {
        let base = [(1.0, 2.0), (3.0, 5.0), (4.0, 1.0), (2.0, 2.0)];
        let original = cosine_similarity(&pairs(&base));

        for k in [0.5f32, 2.0, 3.0, 10.0] {
            let scaled_x: Vec<_> = base.iter().map(|&(x, y)| (k * x, y)).collect();
            let scaled_y: Vec<_> = base.iter().map(|&(x, y)| (x, k * y)).collect();

            assert!((cosine_similarity(&pairs(&scaled_x)).score - original.score).abs() < 1e-6);
            assert!((cosine_similarity(&pairs(&scaled_y)).score - original.score).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let result = cosine_similarity(&pairs(&[(0.0, 4.0), (0.0, 3.0)]));
        assert_eq!(result.score, 0.0);
        assert_eq!(result.strength, 2);
    }

    #[test]
    fn test_empty_pairs() {
        let result = cosine_similarity(&[]);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.strength, 0);
    }

    #[test]
    fn test_opposite_vectors() {
        let result = cosine_similarity(&pairs(&[(1.0, -1.0), (2.0, -2.0)]));
        assert!((result.score + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_not_mean_centered() {
        // Pearson would be undefined for a constant vector; cosine is 1 here
        let result = cosine_similarity(&pairs(&[(3.0, 3.0), (3.0, 3.0), (3.0, 3.0)]));
        assert!((result.score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_measure_trait() {
        let measure: &dyn SimilarityMeasure = &CosineSimilarity;
        assert_eq!(measure.name(), "cosine");
        assert_eq!(measure.score(&pairs(&[(2.0, 4.0)])).strength, 1);
    }
}
