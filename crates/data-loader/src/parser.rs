//! Parser for MovieLens data files.
//!
//! Two on-disk layouts are supported:
//! - MovieLens 100k: `u.data` (`user movie rating timestamp`, whitespace
//!   separated) and `u.item` (`id|title|release date|...`)
//! - MovieLens 1M: `ratings.dat` (`user::movie::rating::timestamp`) and
//!   `movies.dat` (`id::title::genres`)
//!
//! Both are ISO-8859-1 encoded. Blank lines are skipped; any other
//! malformed line fails the whole parse.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::str::FromStr;

/// Which MovieLens release a directory holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    MovieLens100k,
    MovieLens1m,
}

impl DatasetFormat {
    /// Name of the ratings file for this layout
    pub fn ratings_file(self) -> &'static str {
        match self {
            DatasetFormat::MovieLens100k => "u.data",
            DatasetFormat::MovieLens1m => "ratings.dat",
        }
    }

    /// Name of the movie metadata file for this layout
    pub fn movies_file(self) -> &'static str {
        match self {
            DatasetFormat::MovieLens100k => "u.item",
            DatasetFormat::MovieLens1m => "movies.dat",
        }
    }

    /// Guess the layout from the files present in `data_dir`.
    ///
    /// The 100k layout wins if both are present.
    pub fn detect(data_dir: &Path) -> Result<Self> {
        [DatasetFormat::MovieLens100k, DatasetFormat::MovieLens1m]
            .into_iter()
            .find(|format| data_dir.join(format.ratings_file()).is_file())
            .ok_or_else(|| DataLoadError::UnknownLayout {
                dir: data_dir.display().to_string(),
            })
    }

    fn split_rating_line(self, line: &str) -> Vec<&str> {
        match self {
            DatasetFormat::MovieLens100k => line.split_whitespace().collect(),
            DatasetFormat::MovieLens1m => line.split("::").collect(),
        }
    }

    fn split_movie_line(self, line: &str) -> Vec<&str> {
        match self {
            DatasetFormat::MovieLens100k => line.split('|').collect(),
            DatasetFormat::MovieLens1m => line.split("::").collect(),
        }
    }
}

/// Helper function to read a file with ISO-8859-1 encoding (Latin-1)
///
/// Each Latin-1 byte maps directly to the Unicode code point of the same value.
fn read_lines_latin1(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    Ok(decode_latin1(&bytes).lines().map(|s| s.to_string()).collect())
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Pull field `idx` out of a split line, failing with the field name if absent
fn field<'a>(fields: &[&'a str], idx: usize, name: &str, file: &str, line: usize) -> Result<&'a str> {
    fields
        .get(idx)
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .ok_or_else(|| DataLoadError::ParseError {
            file: file.to_string(),
            line,
            reason: format!("Missing {}", name),
        })
}

fn parse_field<T>(raw: &str, name: &str, file: &str, line: usize) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Invalid {}: {}", name, e),
    })
}

/// Parse the ratings file at `path`
pub fn parse_ratings(path: &Path, format: DatasetFormat) -> Result<Vec<Rating>> {
    let lines = read_lines_latin1(path)?;
    parse_rating_lines(&lines, &file_name(path), format)
}

/// Parse the movie metadata file at `path`
pub fn parse_movies(path: &Path, format: DatasetFormat) -> Result<Vec<Movie>> {
    let lines = read_lines_latin1(path)?;
    parse_movie_lines(&lines, &file_name(path), format)
}

/// Parse already-decoded rating lines. `file` is only used in error messages.
pub fn parse_rating_lines<S: AsRef<str>>(
    lines: &[S],
    file: &str,
    format: DatasetFormat,
) -> Result<Vec<Rating>> {
    let mut ratings = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.as_ref().trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let fields = format.split_rating_line(line_trimmed);
        let user_id = field(&fields, 0, "userId", file, line_no)?;
        let movie_id = field(&fields, 1, "movieId", file, line_no)?;
        let rating_value = field(&fields, 2, "rating", file, line_no)?;
        let timestamp = field(&fields, 3, "timestamp", file, line_no)?;

        let rating: f32 = parse_field(rating_value, "rating", file, line_no)?;
        if !rating.is_finite() {
            return Err(DataLoadError::InvalidValue {
                field: "rating".to_string(),
                value: rating_value.to_string(),
            });
        }

        ratings.push(Rating {
            user_id: parse_field(user_id, "userId", file, line_no)?,
            movie_id: parse_field(movie_id, "movieId", file, line_no)?,
            rating,
            timestamp: parse_field(timestamp, "timestamp", file, line_no)?,
        });
    }

    Ok(ratings)
}

/// Parse already-decoded movie metadata lines.
///
/// Only the id and title columns are read; the rest of the record is ignored.
pub fn parse_movie_lines<S: AsRef<str>>(
    lines: &[S],
    file: &str,
    format: DatasetFormat,
) -> Result<Vec<Movie>> {
    let mut movies = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.as_ref().trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let fields = format.split_movie_line(line_trimmed);
        let movie_id = field(&fields, 0, "movieId", file, line_no)?;
        let title = field(&fields, 1, "title", file, line_no)?;

        movies.push(Movie {
            id: parse_field(movie_id, "movieId", file, line_no)?,
            title: title.to_string(),
        });
    }

    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_100k_ratings() {
        let lines = ["196\t242\t3\t881250949", "186 302 3.5 891717742", ""];
        let ratings = parse_rating_lines(&lines, "u.data", DatasetFormat::MovieLens100k).unwrap();

        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].user_id, 196);
        assert_eq!(ratings[0].movie_id, 242);
        assert_eq!(ratings[0].rating, 3.0);
        assert_eq!(ratings[1].rating, 3.5);
        assert_eq!(ratings[1].timestamp, 891717742);
    }

    #[test]
    fn test_parse_1m_ratings() {
        let lines = ["1::1193::5::978300760"];
        let ratings = parse_rating_lines(&lines, "ratings.dat", DatasetFormat::MovieLens1m).unwrap();

        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].movie_id, 1193);
        assert_eq!(ratings[0].rating, 5.0);
    }

    #[test]
    fn test_missing_field_reports_line() {
        let lines = ["1 2 4 100", "1 3"];
        let err = parse_rating_lines(&lines, "u.data", DatasetFormat::MovieLens100k).unwrap_err();

        match err {
            DataLoadError::ParseError { file, line, reason } => {
                assert_eq!(file, "u.data");
                assert_eq!(line, 2);
                assert_eq!(reason, "Missing rating");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_rating_rejected() {
        let lines = ["1 2 great 100"];
        let err = parse_rating_lines(&lines, "u.data", DatasetFormat::MovieLens100k).unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_nan_rating_rejected() {
        let lines = ["1 2 NaN 100"];
        let err = parse_rating_lines(&lines, "u.data", DatasetFormat::MovieLens100k).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { .. }));
    }

    #[test]
    fn test_parse_100k_movies() {
        let lines = [
            "1|Toy Story (1995)|01-Jan-1995||http://us.imdb.com/M/title-exact?Toy%20Story%20(1995)|0|0|0|1|1|1|0|0|0|0|0|0|0|0|0|0|0|0|0",
            "2|GoldenEye (1995)|01-Jan-1995||x|0|1",
        ];
        let movies = parse_movie_lines(&lines, "u.item", DatasetFormat::MovieLens100k).unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0], Movie { id: 1, title: "Toy Story (1995)".to_string() });
        assert_eq!(movies[1].title, "GoldenEye (1995)");
    }

    #[test]
    fn test_parse_1m_movies() {
        let lines = ["1::Toy Story (1995)::Animation|Children's|Comedy"];
        let movies = parse_movie_lines(&lines, "movies.dat", DatasetFormat::MovieLens1m).unwrap();

        assert_eq!(movies[0].id, 1);
        assert_eq!(movies[0].title, "Toy Story (1995)");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Café" with é encoded as the single Latin-1 byte 0xE9
        let bytes = [b'C', b'a', b'f', 0xE9];
        assert_eq!(decode_latin1(&bytes), "Café");
    }

    #[test]
    fn test_missing_file() {
        let err = parse_ratings(Path::new("/nonexistent/u.data"), DatasetFormat::MovieLens100k)
            .unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
