use std::sync::Arc;
use std::time::{Duration, Instant};

use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use cinematch_api::catalog::Catalog;
use cinematch_api::config::Config;
use cinematch_api::db::{create_redis_client, Cache};
use cinematch_api::engine::SimilarityIndex;
use cinematch_api::routes::create_router;
use cinematch_api::services::providers::tmdb::TmdbProvider;
use cinematch_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Catalog and similarity matrix are built exactly once, before the
    // listener starts; every request only reads them.
    let started = Instant::now();
    let catalog = Catalog::load(&config.catalog_path)?;
    tracing::info!(
        movies = catalog.len(),
        path = %config.catalog_path,
        "Catalog loaded"
    );

    let index = SimilarityIndex::build(&catalog);
    tracing::info!(
        movies = index.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Similarity index built"
    );

    let redis_client = create_redis_client(&config.redis_url)?;
    let (cache, cache_writer) = Cache::new(redis_client).await;

    let provider = TmdbProvider::new(
        cache,
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        Duration::from_secs(config.http_timeout_secs),
    )?;

    let state = AppState::new(catalog, index, Arc::new(provider));

    let app = create_router(state).layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Flush pending cache writes before exit
    cache_writer.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
