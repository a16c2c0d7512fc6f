//! Shelfmark Server - HTTP API for book capture sessions

use anyhow::{Context, Result};
use clap::Parser;
use shelfmark_core::config::DEFAULT_BASE_URL;
use shelfmark_core::{GoogleBooksClient, LookupConfig};
use shelfmark_server::{routes, state};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shelfmark-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "SHELFMARK_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Volumes search endpoint
    #[arg(long, env = "SHELFMARK_BOOKS_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Per-request lookup timeout in seconds
    #[arg(
        long,
        env = "SHELFMARK_LOOKUP_TIMEOUT_SECS",
        default_value = "10",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// API key for the search service
    #[arg(long, env = "GOOGLE_BOOKS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Close sessions left unused for this many seconds
    #[arg(
        long,
        env = "SHELFMARK_SESSION_IDLE_SECS",
        default_value = "3600",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    session_idle_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "shelfmark_server=debug,shelfmark_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = LookupConfig::new()
        .with_base_url(args.api_url)
        .with_timeout(Duration::from_secs(args.timeout))
        .with_api_key(args.api_key);
    let lookup = GoogleBooksClient::new(config).context("Failed to create lookup client")?;

    // Create application state
    let state = state::AppState::new(Arc::new(lookup));
    state.spawn_idle_sweeper(Duration::from_secs(args.session_idle_secs));

    // Build router
    let app = routes::create_router(state);

    // Start server
    tracing::info!("Starting server on {}", args.bind);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    axum::serve(listener, app).await?;

    Ok(())
}
