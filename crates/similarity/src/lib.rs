//! Item-item movie similarity.
//!
//! This crate turns per-user ratings into a table of movie-pair
//! similarities and answers "movies like this one" queries against it.
//!
//! ## Architecture
//! The table is built in stages:
//! 1. `pairs`: each user's ratings are self-joined into canonical movie pairs
//! 2. `aggregate`: rating pairs are grouped by movie pair
//! 3. `scorer`: each group is reduced to a cosine score and a strength
//! 4. `table`: results are materialized once and shared read-only
//!
//! Queries (`query`) filter and rank a movie's neighbors, and `catalog`
//! attaches display titles.
//!
//! ## Example Usage
//! ```ignore
//! use similarity::{recommend, QueryConfig, SimilarityTable};
//!
//! let table = SimilarityTable::from_index(&index);
//! let config = QueryConfig::default().with_top_k(5);
//! let named = recommend(&table, &index, 50, &config)?;
//! for item in &named.items {
//!     println!("{}\tscore: {}\tstrength: {}", item.title, item.score, item.strength);
//! }
//! ```

pub mod types;
pub mod pairs;
pub mod aggregate;
pub mod scorer;
pub mod table;
pub mod query;
pub mod catalog;
pub mod error;

// Re-export main types
pub use types::{MoviePairKey, RatingPair, SimilarityResult};
pub use aggregate::PairGroups;
pub use scorer::{cosine_similarity, CosineAccumulator, CosineSimilarity, SimilarityMeasure};
pub use table::SimilarityTable;
pub use query::{QueryConfig, SimilarMovie};
pub use catalog::{recommend, resolve_titles, MovieCatalog, NamedRecommendation, NamedRecommendations};
pub use error::{Result, SimilarityError};
