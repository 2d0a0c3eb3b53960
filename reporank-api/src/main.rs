//! reporank-api - Repository search & popularity scoring service
//!
//! Searches a code-hosting platform's repositories by keyword, language, and
//! creation date, and returns a ranked, popularity-scored list.

use anyhow::Result;
use reporank_common::config::{ServiceConfig, CONFIG_PATH_ENV};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use reporank_api::services::{GithubClient, SearchService};
use reporank_api::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting reporank-api");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
    let config = ServiceConfig::load(config_path.as_deref())?;

    let upstream = Arc::new(GithubClient::new(&config.github)?);
    let search = Arc::new(SearchService::new(upstream, config.search.clone()));
    let state = AppState::new(search);

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Listening on http://{}:{}", config.host, config.port);
    info!("Health check: http://{}:{}/health", config.host, config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
