//! Top-K similar movie queries against a built table.
//!
//! ## Algorithm
//! 1. Take every pair containing the target movie
//! 2. Keep pairs with score > score_threshold and strength > co_occurrence_threshold
//! 3. Map each pair to the movie that isn't the target
//! 4. Sort by score desc, then strength desc, then movie id asc
//! 5. Truncate to top_k

use crate::table::SimilarityTable;
use data_loader::MovieId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Thresholds and result size for a similarity query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Results must score strictly above this
    pub score_threshold: f64,
    /// Results must have strictly more common raters than this
    pub co_occurrence_threshold: u32,
    /// Maximum number of results
    pub top_k: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            score_threshold: 0.10,
            co_occurrence_threshold: 50,
            top_k: 10,
        }
    }
}

impl QueryConfig {
    /// Configure the minimum score, exclusive (default: 0.10)
    pub fn with_score_threshold(mut self, threshold: f64) -> Self {
        self.score_threshold = threshold;
        self
    }

    /// Configure the minimum co-occurrence, exclusive (default: 50)
    pub fn with_co_occurrence_threshold(mut self, threshold: u32) -> Self {
        self.co_occurrence_threshold = threshold;
        self
    }

    /// Configure the number of results (default: 10)
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    fn accepts(&self, score: f64, strength: u32) -> bool {
        score > self.score_threshold && strength > self.co_occurrence_threshold
    }
}

/// One movie similar to the query target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarMovie {
    pub movie_id: MovieId,
    pub score: f64,
    pub strength: u32,
}

impl SimilarityTable {
    /// The movies most similar to `movie_id`, best first.
    ///
    /// An unknown movie or one with nothing above the thresholds gives an
    /// empty Vec.
    #[instrument(skip(self, config))]
    pub fn similar_to(&self, movie_id: MovieId, config: &QueryConfig) -> Vec<SimilarMovie> {
        let mut results: Vec<SimilarMovie> = self
            .neighbors(movie_id)
            .filter(|(_, result)| config.accepts(result.score, result.strength))
            .filter_map(|(key, result)| {
                key.other(movie_id).map(|other| SimilarMovie {
                    movie_id: other,
                    score: result.score,
                    strength: result.strength,
                })
            })
            .collect();

        debug!("{} pairs passed the thresholds", results.len());

        results.sort_by(rank);
        results.truncate(config.top_k);
        results
    }
}

fn rank(a: &SimilarMovie, b: &SimilarMovie) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.strength.cmp(&a.strength))
        .then_with(|| a.movie_id.cmp(&b.movie_id))
}
