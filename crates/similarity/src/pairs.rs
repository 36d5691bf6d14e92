//! Pair generation: per-user self-join of rated movies.
//!
//! ## Algorithm
//! For every user, combine each of their ratings with each other rating
//! (the self-join on user id). Keep a combination only when the first
//! movie id is smaller than the second, which drops self-pairs and leaves
//! exactly one copy of each unordered pair per user.

use crate::types::{MoviePairKey, RatingPair};
use data_loader::{Rating, UserId};
use rayon::prelude::*;
use std::collections::HashMap;

/// Group a flat rating slice by user.
///
/// `DataIndex` already stores ratings this way; this is for callers that
/// only have raw triples.
pub fn group_by_user(ratings: &[Rating]) -> HashMap<UserId, Vec<Rating>> {
    let mut by_user: HashMap<UserId, Vec<Rating>> = HashMap::new();
    for rating in ratings {
        by_user.entry(rating.user_id).or_default().push(*rating);
    }
    by_user
}

/// All canonical movie pairs from one user's ratings.
///
/// A user with fewer than two rated movies yields nothing.
pub fn user_pairs(ratings: &[Rating]) -> impl Iterator<Item = (MoviePairKey, RatingPair)> + '_ {
    ratings.iter().flat_map(move |x| {
        ratings.iter().filter_map(move |y| {
            MoviePairKey::canonical(x.movie_id, y.movie_id)
                .map(|key| (key, RatingPair::new(x.rating, y.rating)))
        })
    })
}

/// Pairs for every user, generated in parallel across users.
///
/// Each element of `users` is one user's complete rating list. No ordering
/// is guaranteed in the output.
pub fn generate_pairs<'a>(
    users: &'a [&'a [Rating]],
) -> impl ParallelIterator<Item = (MoviePairKey, RatingPair)> + 'a {
    users.par_iter().flat_map_iter(|&ratings| user_pairs(ratings))
}
