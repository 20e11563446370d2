use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use review_etl::{
    ApiClient, ApiConfig, CachePaths, StageConfig, StageResult, execute_entities,
    execute_reviews, execute_sentiment,
};

#[derive(Parser)]
#[command(name = "review-etl")]
#[command(author, version, about = "Place review sentiment and entity ETL pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch reviews for every place identifier
    Reviews {
        /// Place identifier table (CSV) [default: cache/place_ids.csv]
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Reviews cache file [default: cache/reviews.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Score every review sentence by sentence
    Sentiment {
        /// Reviews table (CSV) [default: cache/reviews.csv]
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Sentence sentiment cache file
        /// [default: cache/reviews_sentiment_by_sentence.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Extract named entities from every scored sentence
    Entities {
        /// Sentence sentiment table (CSV)
        /// [default: cache/reviews_sentiment_by_sentence.csv]
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Entity cache file
        /// [default: cache/reviews_sentiment_by_sentence_with_entities.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run all three stages, each reading the previous stage's cache file
    Run {
        /// Directory holding place_ids.csv and the cache files
        #[arg(long, default_value = "cache")]
        cache_dir: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let defaults = CachePaths::default();

    match cli.command {
        Commands::Reviews {
            input,
            output,
            verbose,
        } => {
            setup_logging(verbose);
            let client = build_client()?;
            let config = StageConfig::new(
                input.unwrap_or(defaults.place_ids),
                output.unwrap_or(defaults.reviews),
            );
            let result = execute_reviews(&client, config)
                .await
                .context("Reviews stage failed")?;
            print_summary("reviews", &result);
            Ok(())
        }
        Commands::Sentiment {
            input,
            output,
            verbose,
        } => {
            setup_logging(verbose);
            let client = build_client()?;
            let config = StageConfig::new(
                input.unwrap_or(defaults.reviews),
                output.unwrap_or(defaults.sentiment),
            );
            let result = execute_sentiment(&client, config)
                .await
                .context("Sentiment stage failed")?;
            print_summary("sentiment", &result);
            Ok(())
        }
        Commands::Entities {
            input,
            output,
            verbose,
        } => {
            setup_logging(verbose);
            let client = build_client()?;
            let config = StageConfig::new(
                input.unwrap_or(defaults.sentiment),
                output.unwrap_or(defaults.entities),
            );
            let result = execute_entities(&client, config)
                .await
                .context("Entity stage failed")?;
            print_summary("entities", &result);
            Ok(())
        }
        Commands::Run { cache_dir, verbose } => {
            setup_logging(verbose);
            run_pipeline(CachePaths::in_dir(&cache_dir)).await
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn build_client() -> Result<ApiClient> {
    let config = ApiConfig::from_env().context("Failed to load API configuration")?;
    Ok(ApiClient::new(config))
}

async fn run_pipeline(paths: CachePaths) -> Result<()> {
    let client = build_client()?;

    info!("Stage 1: Fetching reviews...");
    let reviews = execute_reviews(
        &client,
        StageConfig::new(paths.place_ids.clone(), paths.reviews.clone()),
    )
    .await
    .context("Reviews stage failed")?;
    print_summary("reviews", &reviews);

    info!("Stage 2: Scoring sentences...");
    let sentiment = execute_sentiment(
        &client,
        StageConfig::new(paths.reviews.clone(), paths.sentiment.clone()),
    )
    .await
    .context("Sentiment stage failed")?;
    print_summary("sentiment", &sentiment);

    info!("Stage 3: Extracting entities...");
    let entities = execute_entities(
        &client,
        StageConfig::new(paths.sentiment.clone(), paths.entities.clone()),
    )
    .await
    .context("Entity stage failed")?;
    print_summary("entities", &entities);

    info!("Complete: {} entity rows", entities.rows.len());
    Ok(())
}

fn print_summary<R>(stage: &str, result: &StageResult<R>) {
    println!(
        "{:<10} {:>6} in  {:>6} out  {:>4} skipped  -> {}",
        stage,
        result.inputs,
        result.rows.len(),
        result.skipped,
        result.output.display()
    );
}
