mod config;
mod errors;
mod extraction;
mod routes;
mod state;
mod web;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::name::HeuristicRecognizer;
use crate::extraction::skills::SkillsDb;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resumescan v{}", env!("CARGO_PKG_VERSION"));

    // A missing skills list is fatal; nothing is served without it.
    let skills = SkillsDb::load(&config.skills_file)?;
    if skills.is_empty() {
        warn!("{} contains no skills; skill extraction will return nothing", config.skills_file);
    }

    let state = AppState {
        config: config.clone(),
        skills: Arc::new(skills),
        recognizer: Arc::new(HeuristicRecognizer::default()),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("HOST and PORT must form a socket address")?;
    info!(
        "Listening on {addr} (upload limit {} bytes)",
        config.max_upload_bytes
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
