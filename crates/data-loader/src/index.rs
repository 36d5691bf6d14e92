//! DataIndex building logic.
//!
//! Parses the ratings and movie files concurrently and groups ratings by
//! user as they are inserted.

use crate::error::Result;
use crate::parser::{self, DatasetFormat};
use crate::types::*;
use std::path::Path;
use tracing::{info, warn};

impl DataIndex {
    /// Load a MovieLens dataset from a directory, detecting its layout.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        let format = DatasetFormat::detect(data_dir)?;
        Self::load_with_format(data_dir, format)
    }

    /// Load a MovieLens dataset from a directory with a known layout.
    ///
    /// Steps:
    /// 1. Parse ratings and movies in parallel
    /// 2. Insert movies (name index) and ratings (grouped by user)
    /// 3. Report ratings whose movie has no title
    pub fn load_with_format(data_dir: &Path, format: DatasetFormat) -> Result<Self> {
        info!("Loading {:?} dataset from {:?}", format, data_dir);

        let ratings_path = data_dir.join(format.ratings_file());
        let movies_path = data_dir.join(format.movies_file());

        let (ratings, movies) = rayon::join(
            || parser::parse_ratings(&ratings_path, format),
            || parser::parse_movies(&movies_path, format),
        );
        let ratings = ratings?;
        let movies = movies?;

        info!("Parsed {} movies, {} ratings", movies.len(), ratings.len());

        let mut index = DataIndex::new();
        for movie in movies {
            index.insert_movie(movie);
        }
        for rating in ratings {
            index.insert_rating(rating);
        }

        let untitled = index.untitled_rating_count();
        if untitled > 0 {
            // Not fatal: names are only needed when printing query results.
            warn!("{} ratings reference movies missing from {}", untitled, format.movies_file());
        }

        let (users, movies, ratings) = index.counts();
        info!("DataIndex built: {} users, {} movies, {} ratings", users, movies, ratings);
        Ok(index)
    }

    /// Number of ratings whose movie id is absent from the name index
    pub fn untitled_rating_count(&self) -> usize {
        self.user_ratings
            .values()
            .flatten()
            .filter(|r| !self.movies.contains_key(&r.movie_id))
            .count()
    }
}
