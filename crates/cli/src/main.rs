use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use data_loader::{DataIndex, DatasetFormat, MovieId};
use similarity::{recommend, NamedRecommendation, NamedRecommendations, QueryConfig, SimilarityTable};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Similar Movies - item-item similarity over MovieLens ratings
#[derive(Parser, Debug)]
#[command(name = "similar-movies")]
#[command(about = "Find movies similar to a given movie using cosine similarity of user ratings", long_about = None)]
struct Cli {
    /// Movie ID to find similar movies for. Without it the similarity table
    /// is built and nothing is queried.
    movie_id: Option<MovieId>,

    /// Path to MovieLens dataset directory
    #[arg(short, long, default_value = "data/ml-100k")]
    data_dir: PathBuf,

    /// Dataset file layout
    #[arg(long, value_enum, default_value_t = Format::Auto)]
    format: Format,

    /// Only show movies scoring strictly above this
    #[arg(long, default_value_t = 0.10)]
    min_score: f64,

    /// Only show movies with strictly more common raters than this
    #[arg(long, default_value_t = 50)]
    min_co_occurrence: u32,

    /// Number of similar movies to show
    #[arg(long, default_value_t = 10)]
    limit: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Detect from the files in the data directory
    Auto,
    /// u.data / u.item
    #[value(name = "ml-100k")]
    Ml100k,
    /// ratings.dat / movies.dat
    #[value(name = "ml-1m")]
    Ml1m,
}

/// What to do once the similarity table is built
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    /// Build the table and exit without output
    ComputeOnly,
    /// Print the movies most similar to this one
    Query(MovieId),
}

impl Cli {
    fn run_mode(&self) -> RunMode {
        match self.movie_id {
            Some(movie_id) => RunMode::Query(movie_id),
            None => RunMode::ComputeOnly,
        }
    }

    fn query_config(&self) -> QueryConfig {
        QueryConfig::default()
            .with_score_threshold(self.min_score)
            .with_co_occurrence_threshold(self.min_co_occurrence)
            .with_top_k(self.limit)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mode = cli.run_mode();
    let config = cli.query_config();

    println!("Loading MovieLens dataset from {}...", cli.data_dir.display());
    let start = Instant::now();

    // Loading and the pairwise build are CPU-bound; keep them off the async workers
    let data_dir = cli.data_dir.clone();
    let format = cli.format;
    let (index, table) = tokio::task::spawn_blocking(move || load_and_build(&data_dir, format))
        .await
        .context("Similarity build task failed")??;

    println!(
        "{} Built similarity table ({} movie pairs) in {:?}",
        "✓".green(),
        table.len(),
        start.elapsed()
    );

    match mode {
        RunMode::ComputeOnly => {
            info!("No movie ID given; similarity table built, no query run");
        }
        RunMode::Query(movie_id) => handle_query(&index, &table, movie_id, &config)?,
    }

    Ok(())
}

/// Load the dataset and compute the similarity table
fn load_and_build(data_dir: &Path, format: Format) -> Result<(DataIndex, SimilarityTable)> {
    let index = match format {
        Format::Auto => DataIndex::load_from_files(data_dir),
        Format::Ml100k => DataIndex::load_with_format(data_dir, DatasetFormat::MovieLens100k),
        Format::Ml1m => DataIndex::load_with_format(data_dir, DatasetFormat::MovieLens1m),
    }
    .context("Failed to load MovieLens dataset")?;

    let table = SimilarityTable::from_index(&index);
    Ok((index, table))
}

/// Handle a single movie query
fn handle_query(
    index: &DataIndex,
    table: &SimilarityTable,
    movie_id: MovieId,
    config: &QueryConfig,
) -> Result<()> {
    let named = recommend(table, index, movie_id, config)
        .with_context(|| format!("Could not list movies similar to movie {}", movie_id))?;

    print_recommendations(&named, config);
    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(named: &NamedRecommendations, config: &QueryConfig) {
    if named.is_empty() {
        println!(
            "{}",
            format!(
                "No similar movies found for {} (score > {}, strength > {})",
                named.title, config.score_threshold, config.co_occurrence_threshold
            )
            .yellow()
        );
        return;
    }

    println!(
        "{}",
        format!("Top {} similar movies for {}:", config.top_k, named.title)
            .bold()
            .blue()
    );
    for item in &named.items {
        println!("{}", format_line(item));
    }
}

fn format_line(item: &NamedRecommendation) -> String {
    format!(
        "{}\tscore: {}\tstrength: {}",
        item.title, item.score, item.strength
    )
}
