use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use sentiscope::analysis::Analyzer;
use sentiscope::batch::{self, BatchOptions};
use sentiscope::config::Config;
use sentiscope::output;
use sentiscope::sentiment::scorer::SentimentScorer;

/// Sentiscope: topic sentiment analysis for short social posts.
///
/// Fetches posts about a topic, scores each one with a lexicon-based
/// sentiment model and summarizes the mood, trend and standout posts.
#[derive(Parser)]
#[command(name = "sentiscope", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: 5000)
        #[arg(long, default_value = "5000")]
        port: u16,

        /// Address to bind (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Analyze sentiment for a topic
    Analyze {
        /// The topic to search for (e.g. "Electric Vehicles")
        topic: String,

        /// Max records to fetch (default: SENTISCOPE_DEFAULT_MAX_RECORDS or 500)
        #[arg(long)]
        max_records: Option<usize>,

        /// Also write a Markdown report to this path
        #[arg(long)]
        report: Option<String>,

        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Score every row of a CSV file offline
    Batch {
        /// Input CSV with a `content` column
        #[arg(long)]
        input: PathBuf,

        /// Output CSV (default: <input>_analyzed.csv)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Drop English stopwords before scoring
        #[arg(long)]
        remove_stopwords: bool,
    },

    /// List suggested topics
    Topics,
}

fn build_analyzer(config: &Config) -> Result<Analyzer> {
    config.require_max_records()?;
    let source = config.build_source()?;
    Ok(Analyzer::new(
        source,
        SentimentScorer::default(),
        config.analyzer_options(),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sentiscope=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let analyzer = build_analyzer(&config)?;
            let state = sentiscope::web::AppState::new(analyzer, config);
            sentiscope::web::run_server(state, port, &bind).await?;
        }

        Commands::Analyze {
            topic,
            max_records,
            report,
            json,
        } => {
            let config = Config::load()?;
            let analyzer = build_analyzer(&config)?;
            let max_records = max_records.unwrap_or(config.default_max_records);

            let result = analyzer.run_analysis(&topic, max_records).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                output::terminal::display_analysis(&result);
            }

            if let Some(path) = report {
                let report_path = output::markdown::generate_report(&result, &path)?;
                println!(
                    "{}",
                    format!("Markdown report saved to: {report_path}").bold()
                );
            }
        }

        Commands::Batch {
            input,
            output: output_path,
            remove_stopwords,
        } => {
            let output_path = output_path.unwrap_or_else(|| batch::default_output_path(&input));
            info!(input = %input.display(), output = %output_path.display(), "Starting batch scoring");

            let opts = BatchOptions {
                input,
                output: output_path,
                remove_stopwords,
                show_progress: true,
            };
            let scorer = SentimentScorer::default();
            let summary =
                tokio::task::spawn_blocking(move || batch::process_file(&scorer, &opts)).await??;

            output::terminal::display_batch_summary(&summary);
        }

        Commands::Topics => {
            output::terminal::display_topics(sentiscope::catalog::suggestion_topics());
        }
    }

    Ok(())
}
