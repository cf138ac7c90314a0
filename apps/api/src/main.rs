mod config;
mod documents;
mod errors;
mod jobs;
mod matching;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::sources::{build_http_client, HttpJobBoard, JobSource};
use crate::matching::featurizer::{Featurizer, KeywordFeaturizer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Match API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize featurizer (KeywordFeaturizer; a real embedding model plugs in here)
    let featurizer: Arc<dyn Featurizer> = Arc::new(KeywordFeaturizer::default());
    info!("Featurizer initialized ({})", featurizer.name());

    // Initialize job boards
    let job_sources = build_job_sources(&config)?;
    info!(
        "Job sources: [{}], top_k={}, fetch timeout={:?}",
        job_sources
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", "),
        config.jobs_top_k,
        config.job_fetch_timeout
    );

    let state = AppState::new(config.clone(), featurizer, job_sources);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Remotive then Arbeitnow, sharing one HTTP client. None when disabled by config.
fn build_job_sources(config: &Config) -> Result<Vec<Arc<dyn JobSource>>> {
    if !config.enable_external_job_sources {
        return Ok(vec![]);
    }

    let client = build_http_client()?;
    let remotive: Arc<dyn JobSource> =
        Arc::new(HttpJobBoard::remotive(client.clone(), &config.remotive_url));
    let arbeitnow: Arc<dyn JobSource> =
        Arc::new(HttpJobBoard::arbeitnow(client, &config.arbeitnow_url));
    Ok(vec![remotive, arbeitnow])
}
