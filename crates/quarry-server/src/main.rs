use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use quarry_core::{MemoryCache, ScrapeService};
use quarry_engine::ScraperEngine;
use quarry_server::routes;
use quarry_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(default_log_filter()?)
        .with_target(false)
        .init();

    let port = std::env::var("QUARRY_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");

    let engine = ScraperEngine::new()?;
    let service = ScrapeService::new(engine, MemoryCache::default());
    let state = Arc::new(AppState { service });

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Info-level logging for the workspace crates unless `RUST_LOG` says
/// otherwise. Log targets are the crate names (`quarry_core`, not `quarry`),
/// so each crate needs its own directive.
fn default_log_filter() -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive("quarry_core=info".parse()?)
        .add_directive("quarry_engine=info".parse()?)
        .add_directive("quarry_server=info".parse()?))
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    tracing::info!("Shutdown signal received");
}
