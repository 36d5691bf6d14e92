//! # Data Loader Crate
//!
//! Loads MovieLens ratings and movie titles into memory.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Rating, Movie, DataIndex)
//! - **parser**: Parse the 100k and 1M file layouts
//! - **index**: Build the DataIndex from a dataset directory
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(Path::new("data/ml-100k"))?;
//! let ratings = index.get_user_ratings(1);
//! println!("User 1 rated {} movies", ratings.len());
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use parser::DatasetFormat;
pub use types::{DataIndex, Movie, MovieId, Rating, UserId};
