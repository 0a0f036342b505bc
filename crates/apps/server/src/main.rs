use std::sync::Arc;

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod loader;
mod render;
mod sources;
mod startup;
mod state;

use config::ServerConfig;
use sources::{DataSource, HttpSource};
use state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    let state = AppState::new();

    let countries_source: Arc<dyn DataSource> = Arc::new(HttpSource::new(
        "countries",
        config.countries_url.clone(),
        config.fetch,
    )?);
    let borders_source: Arc<dyn DataSource> = Arc::new(HttpSource::new(
        "borders",
        config.borders_url.clone(),
        config.fetch,
    )?);

    startup::spawn_loaders(
        state.clone(),
        countries_source,
        borders_source,
        config.fallback_seed,
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    let app = api::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("globe server listening on http://{}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
