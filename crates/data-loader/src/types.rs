//! Core domain types for the MovieLens dataset.
//!
//! Only what the similarity pipeline needs is modelled here: ratings
//! grouped by user, and the movie-id → title lookup used when printing
//! results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

// =============================================================================
// Movie
// =============================================================================

/// A movie from the metadata file. Only the display title is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
}

// =============================================================================
// Rating
// =============================================================================

/// A single rating from a user for a movie
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value, 1.0 to 5.0 in the MovieLens datasets
    pub rating: f32,
    /// Unix timestamp when rating was made (not used for similarity)
    pub timestamp: i64,
}

// =============================================================================
// DataIndex - ratings grouped by user plus the movie name index
// =============================================================================

/// Holds the loaded dataset.
///
/// Ratings are stored grouped by user, which is the grouping the pair
/// generator needs. Movies are keyed by id and act as the name index for
/// output formatting.
#[derive(Debug, Default)]
pub struct DataIndex {
    pub(crate) movies: HashMap<MovieId, Movie>,
    /// All ratings made by each user
    pub(crate) user_ratings: HashMap<UserId, Vec<Rating>>,
}

impl DataIndex {
    /// Creates a new, empty DataIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// Display title for a movie, if it is in the name index
    pub fn movie_title(&self, id: MovieId) -> Option<&str> {
        self.movies.get(&id).map(|m| m.title.as_str())
    }

    /// Get all ratings made by a user
    ///
    /// Returns an empty slice if user has no ratings
    pub fn get_user_ratings(&self, user_id: UserId) -> &[Rating] {
        self.user_ratings
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate over every user's rating list.
    ///
    /// Iteration order is unspecified.
    pub fn ratings_by_user(&self) -> impl Iterator<Item = (UserId, &[Rating])> {
        self.user_ratings
            .iter()
            .map(|(&user_id, ratings)| (user_id, ratings.as_slice()))
    }

    /// Insert a movie into the index
    pub fn insert_movie(&mut self, movie: Movie) {
        self.movies.insert(movie.id, movie);
    }

    /// Insert a rating under its user
    pub fn insert_rating(&mut self, rating: Rating) {
        self.user_ratings
            .entry(rating.user_id)
            .or_default()
            .push(rating);
    }

    /// (users, movies, ratings) counts for logging and validation
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_ratings = self.user_ratings.values().map(|v| v.len()).sum();
        (self.user_ratings.len(), self.movies.len(), total_ratings)
    }
}
