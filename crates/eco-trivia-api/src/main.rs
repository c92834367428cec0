//! Eco Trivia API server entry point.

use std::sync::{Arc, Mutex};

use eco_trivia_api::config::AppConfig;
use eco_trivia_api::error::AppError;
use eco_trivia_api::state::{AppState, TriviaStore};
use eco_trivia_api::telemetry;
use eco_trivia_core::rng::{DeterministicRng, SeededRng};
use eco_trivia_store::pg_trivia_store::PgTriviaStore;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    let tracer_provider = telemetry::init_tracing(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting Eco Trivia API server");

    let result = serve(&config).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "server stopped with error");
    }

    telemetry::shutdown_tracing(tracer_provider);
    result
}

async fn serve(config: &AppConfig) -> Result<(), AppError> {
    // Create database connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    if config.run_migrations {
        tracing::info!("Applying database migrations");
        sqlx::migrate!("../../migrations").run(&pool).await?;
    }

    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = match config.rng_seed {
        Some(seed) => {
            tracing::info!(seed, "Using seeded RNG for trivia selection");
            Arc::new(Mutex::new(SeededRng::from_seed(seed)))
        }
        None => Arc::new(Mutex::new(SeededRng::from_os_rng())),
    };
    let trivia_store: Arc<TriviaStore> = Arc::new(PgTriviaStore::new(pool));
    let app_state = AppState::new(trivia_store, rng);

    // TODO: Replace CorsLayer::permissive() with the client's origin once it is deployed.
    let app = eco_trivia_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
