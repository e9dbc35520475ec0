use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod handlers;
mod puzzle_cache;
mod responses;

use app_state::{build_quote_source, default_keywords, AppState, StoreBackend};
use config::AppConfig;
use puzzle_cache::PuzzleCache;
use unquote_store::memory::MemoryStore;
use unquote_store::pg::PgStore;

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("no .env file loaded: {e}");
    }

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Some(endpoint) = &config.otel_endpoint {
        tracing::info!("tracing export configured for {endpoint}");
    }

    let quotes = build_quote_source(config.quotes_file_path.clone());
    let keywords = Arc::new(default_keywords());

    let (store, database_configured) = match &config.database_url {
        Some(url) => {
            let pool = sqlx::PgPool::connect(url)
                .await
                .unwrap_or_else(|e| panic!("failed to connect to postgres instance: {e}"));
            tracing::info!("connected to postgres");
            (StoreBackend::Postgres(PgStore(pool)), true)
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory player/session store");
            (StoreBackend::Memory(MemoryStore::new()), false)
        }
    };

    let state = AppState {
        quotes,
        keywords,
        puzzles: PuzzleCache::new(),
        store,
        database_configured,
    };

    let app = Router::new()
        .route("/health/live", get(handlers::health::live))
        .route("/health/ready", get(handlers::health::ready))
        .route("/game/today", get(handlers::game::today))
        .route("/game/{date}", get(handlers::game::by_date))
        .route("/game/{id}/check", post(handlers::game::check))
        .route("/players", post(handlers::players::register))
        .route("/players/{claim_code}/stats", get(handlers::players::stats))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr()));

    tracing::info!("listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    tracing::info!("shutdown signal received");
}
