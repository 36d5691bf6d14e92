//! Attaching display titles to query results.

use crate::error::{Result, SimilarityError};
use crate::query::{QueryConfig, SimilarMovie};
use crate::table::SimilarityTable;
use data_loader::{DataIndex, MovieId};
use serde::Serialize;
use std::collections::HashMap;

/// Lookup from movie id to display title.
pub trait MovieCatalog {
    fn title(&self, movie_id: MovieId) -> Option<&str>;
}

impl MovieCatalog for DataIndex {
    fn title(&self, movie_id: MovieId) -> Option<&str> {
        self.movie_title(movie_id)
    }
}

impl MovieCatalog for HashMap<MovieId, String> {
    fn title(&self, movie_id: MovieId) -> Option<&str> {
        self.get(&movie_id).map(String::as_str)
    }
}

/// A similar movie with its title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f64,
    pub strength: u32,
}

/// Query results for one target movie, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedRecommendations {
    pub movie_id: MovieId,
    pub title: String,
    pub items: Vec<NamedRecommendation>,
}

impl NamedRecommendations {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn lookup<C: MovieCatalog + ?Sized>(catalog: &C, movie_id: MovieId) -> Result<String> {
    catalog
        .title(movie_id)
        .map(str::to_string)
        .ok_or(SimilarityError::UnknownMovie { movie_id })
}

/// Resolve titles for a target movie and its query results.
///
/// Fails on the first id (target first) missing from `catalog`.
pub fn resolve_titles<C: MovieCatalog + ?Sized>(
    catalog: &C,
    movie_id: MovieId,
    hits: Vec<SimilarMovie>,
) -> Result<NamedRecommendations> {
    let title = lookup(catalog, movie_id)?;
    let items = hits
        .into_iter()
        .map(|hit| {
            Ok(NamedRecommendation {
                movie_id: hit.movie_id,
                title: lookup(catalog, hit.movie_id)?,
                score: hit.score,
                strength: hit.strength,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(NamedRecommendations { movie_id, title, items })
}

/// Query `table` and resolve titles in one step.
///
/// An unknown target is reported before the query runs.
pub fn recommend<C: MovieCatalog + ?Sized>(
    table: &SimilarityTable,
    catalog: &C,
    movie_id: MovieId,
    config: &QueryConfig,
) -> Result<NamedRecommendations> {
    lookup(catalog, movie_id)?;
    let hits = table.similar_to(movie_id, config);
    resolve_titles(catalog, movie_id, hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MoviePairKey, SimilarityResult};

    fn catalog() -> HashMap<MovieId, String> {
        HashMap::from([
            (1, "Star Wars (1977)".to_string()),
            (2, "Return of the Jedi (1983)".to_string()),
        ])
    }

    fn table() -> SimilarityTable {
        [
            (MoviePairKey::canonical(1, 2).unwrap(), SimilarityResult { score: 0.98, strength: 480 }),
            (MoviePairKey::canonical(1, 3).unwrap(), SimilarityResult { score: 0.97, strength: 120 }),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_resolve_titles() {
        let hits = vec![SimilarMovie { movie_id: 2, score: 0.98, strength: 480 }];
        let named = resolve_titles(&catalog(), 1, hits).unwrap();

        assert_eq!(named.title, "Star Wars (1977)");
        assert_eq!(named.items.len(), 1);
        assert_eq!(named.items[0].title, "Return of the Jedi (1983)");
        assert_eq!(named.items[0].strength, 480);
    }

    #[test]
    fn test_unknown_target() {
        let err = recommend(&table(), &catalog(), 3, &QueryConfig::default()).unwrap_err();
        assert_eq!(err, SimilarityError::UnknownMovie { movie_id: 3 });
    }

    #[test]
    fn test_unknown_result_movie() {
        // Movie 3 is in the table but has no title
        let err = recommend(&table(), &catalog(), 1, &QueryConfig::default()).unwrap_err();
        assert_eq!(err, SimilarityError::UnknownMovie { movie_id: 3 });
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let config = QueryConfig::default().with_score_threshold(0.99);
        let named = recommend(&table(), &catalog(), 1, &config).unwrap();
        assert!(named.is_empty());
        assert_eq!(named.title, "Star Wars (1977)");
    }

    #[test]
    fn test_data_index_catalog() {
        let mut index = DataIndex::new();
        index.insert_movie(data_loader::Movie { id: 5, title: "Fargo (1996)".to_string() });

        assert_eq!(MovieCatalog::title(&index, 5), Some("Fargo (1996)"));
        assert_eq!(MovieCatalog::title(&index, 6), None);
    }
}
