//! Error types for the similarity crate.

use data_loader::MovieId;
use thiserror::Error;

/// Errors surfaced by the similarity crate.
///
/// Table construction and queries themselves cannot fail; only turning
/// movie ids into display titles can.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SimilarityError {
    /// Movie id missing from the movie name index
    #[error("Movie {movie_id} not found in the movie name index")]
    UnknownMovie { movie_id: MovieId },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SimilarityError>;
