//! The materialized similarity table.
//!
//! Built once from the full rating set (pair generation → aggregation →
//! scoring) and then only read. Queries go through the per-movie neighbor
//! index rather than scanning every pair.

use crate::aggregate::PairGroups;
use crate::pairs::{generate_pairs, group_by_user};
use crate::scorer::{CosineSimilarity, SimilarityMeasure};
use crate::types::{MoviePairKey, SimilarityResult};
use data_loader::{DataIndex, MovieId, Rating};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Similarity result for every movie pair with at least one common rater.
#[derive(Debug, Clone, Default)]
pub struct SimilarityTable {
    entries: HashMap<MoviePairKey, SimilarityResult>,
    /// Keys each movie takes part in
    neighbors: HashMap<MovieId, Vec<MoviePairKey>>,
}

impl SimilarityTable {
    /// Build a cosine similarity table from a loaded dataset.
    pub fn from_index(index: &DataIndex) -> Self {
        Self::from_index_with(index, &CosineSimilarity)
    }

    /// Build from a loaded dataset with any similarity measure.
    pub fn from_index_with<M: SimilarityMeasure>(index: &DataIndex, measure: &M) -> Self {
        let users: Vec<&[Rating]> = index.ratings_by_user().map(|(_, ratings)| ratings).collect();
        Self::build(&users, measure)
    }

    /// Build a cosine similarity table from raw, ungrouped ratings.
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        let by_user = group_by_user(ratings);
        let users: Vec<&[Rating]> = by_user.values().map(Vec::as_slice).collect();
        Self::build(&users, &CosineSimilarity)
    }

    /// Run the full pipeline over per-user rating lists.
    ///
    /// Each element of `users` must hold all ratings of one user.
    #[instrument(skip_all, fields(measure = measure.name(), users = users.len()))]
    pub fn build<M: SimilarityMeasure>(users: &[&[Rating]], measure: &M) -> Self {
        let start = Instant::now();

        let groups = PairGroups::aggregate(generate_pairs(users));
        debug!(
            "Aggregated {} rating pairs into {} movie pairs in {:.2?}",
            groups.observation_count(),
            groups.len(),
            start.elapsed()
        );

        let entries: HashMap<MoviePairKey, SimilarityResult> = groups
            .into_inner()
            .into_par_iter()
            .map(|(key, pairs)| (key, measure.score(&pairs)))
            .collect();

        let table = Self::from_entries(entries);
        info!(
            "Built similarity table: {} movie pairs over {} movies in {:.2?}",
            table.len(),
            table.movie_count(),
            start.elapsed()
        );
        table
    }

    /// Wrap precomputed results, building the neighbor index.
    pub fn from_entries(entries: HashMap<MoviePairKey, SimilarityResult>) -> Self {
        let mut neighbors: HashMap<MovieId, Vec<MoviePairKey>> = HashMap::new();
        for key in entries.keys() {
            neighbors.entry(key.first()).or_default().push(*key);
            neighbors.entry(key.second()).or_default().push(*key);
        }
        Self { entries, neighbors }
    }

    /// Result for two movies, in either order
    pub fn get(&self, x: MovieId, y: MovieId) -> Option<&SimilarityResult> {
        MoviePairKey::unordered(x, y).and_then(|key| self.entries.get(&key))
    }

    /// Number of movie pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct movies appearing in at least one pair
    pub fn movie_count(&self) -> usize {
        self.neighbors.len()
    }

    pub fn contains_movie(&self, movie_id: MovieId) -> bool {
        self.neighbors.contains_key(&movie_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MoviePairKey, &SimilarityResult)> {
        self.entries.iter()
    }

    /// Every pair containing `movie_id`, with its result
    pub fn neighbors(&self, movie_id: MovieId) -> impl Iterator<Item = (MoviePairKey, SimilarityResult)> + '_ {
        self.neighbors
            .get(&movie_id)
            .into_iter()
            .flatten()
            .filter_map(|key| self.entries.get(key).map(|result| (*key, *result)))
    }
}

impl FromIterator<(MoviePairKey, SimilarityResult)> for SimilarityTable {
    fn from_iter<T: IntoIterator<Item = (MoviePairKey, SimilarityResult)>>(iter: T) -> Self {
        Self::from_entries(iter.into_iter().collect())
    }
}
