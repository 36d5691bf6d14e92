//! Pair aggregation: group rating pairs by movie pair.
//!
//! Grouping runs as a parallel fold into per-thread maps followed by a
//! merge. The merge is the only point where contributions from different
//! users meet.

use crate::types::{MoviePairKey, RatingPair};
use rayon::prelude::*;
use std::collections::HashMap;

type Groups = HashMap<MoviePairKey, Vec<RatingPair>>;

/// Every rating pair observed for each movie pair.
///
/// Multiset semantics: identical rating pairs from different users are
/// separate observations and are all kept.
#[derive(Debug, Default)]
pub struct PairGroups {
    groups: Groups,
}

impl PairGroups {
    /// Group a parallel stream of pairs by key.
    pub fn aggregate<I>(pairs: I) -> Self
    where
        I: ParallelIterator<Item = (MoviePairKey, RatingPair)>,
    {
        let groups = pairs
            .fold(Groups::new, |mut local, (key, pair)| {
                local.entry(key).or_default().push(pair);
                local
            })
            .reduce(Groups::new, merge_groups);

        Self { groups }
    }

    /// Number of distinct movie pairs
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total rating pairs across all movie pairs
    pub fn observation_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn get(&self, key: &MoviePairKey) -> Option<&[RatingPair]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MoviePairKey, &[RatingPair])> {
        self.groups.iter().map(|(key, pairs)| (key, pairs.as_slice()))
    }

    pub fn into_inner(self) -> HashMap<MoviePairKey, Vec<RatingPair>> {
        self.groups
    }
}

impl FromIterator<(MoviePairKey, RatingPair)> for PairGroups {
    fn from_iter<T: IntoIterator<Item = (MoviePairKey, RatingPair)>>(iter: T) -> Self {
        let mut groups = Groups::new();
        for (key, pair) in iter {
            groups.entry(key).or_default().push(pair);
        }
        Self { groups }
    }
}

/// Merge two partial groupings, draining the smaller into the larger.
fn merge_groups(mut acc: Groups, mut other: Groups) -> Groups {
    if acc.len() < other.len() {
        std::mem::swap(&mut acc, &mut other);
    }
    for (key, mut pairs) in other {
        acc.entry(key).or_default().append(&mut pairs);
    }
    acc
}
