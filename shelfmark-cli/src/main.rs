//! Shelfmark CLI - match book lists against the catalog and export them

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use shelfmark_core::config::DEFAULT_BASE_URL;
use shelfmark_core::export::EXPORT_FILE_NAME;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse and validate a timeout in seconds (must be at least 1)
fn parse_timeout(s: &str) -> Result<u64, String> {
    let n: u64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("timeout must be at least 1 second".to_string())
    } else {
        Ok(n)
    }
}

#[derive(Parser)]
#[command(name = "shelfmark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    lookup: LookupArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Bibliographic search settings
#[derive(Args)]
pub struct LookupArgs {
    /// Volumes search endpoint
    #[arg(long, global = true, env = "SHELFMARK_BOOKS_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(
        long,
        global = true,
        env = "SHELFMARK_LOOKUP_TIMEOUT_SECS",
        default_value = "10",
        value_parser = parse_timeout
    )]
    pub timeout: u64,

    /// API key for the search service
    #[arg(long, global = true, env = "GOOGLE_BOOKS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

impl LookupArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Match books automatically, taking the top result for each
    Match {
        /// JSON file with an array of {"title", "author"} objects (sample books if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Output CSV path
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: String,
    },

    /// Review candidates and choose each match interactively
    Review {
        /// JSON file with an array of {"title", "author"} objects (sample books if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Output CSV path
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: String,
    },

    /// Import books from a shelf-photo detector payload
    ImportDetected {
        /// Detector payload file ({"books": [{"title", "author"}]})
        payload: String,

        /// Choose matches interactively instead of taking the top result
        #[arg(long)]
        interactive: bool,

        /// Output CSV path
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "shelfmark_cli=debug,shelfmark_core=debug"
    } else {
        "shelfmark_cli=info,shelfmark_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Match { input, output } => {
            commands::match_books(&cli.lookup, input.as_deref(), &output).await
        }

        Commands::Review { input, output } => {
            commands::review(&cli.lookup, input.as_deref(), &output).await
        }

        Commands::ImportDetected {
            payload,
            interactive,
            output,
        } => commands::import_detected(&cli.lookup, &payload, interactive, &output).await,
    }
}
