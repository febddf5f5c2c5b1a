//! Vitrine Server - Product catalog API.
//!
//! This binary serves the catalog API on port 8000.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - `PostgreSQL` as a document store (one `jsonb` row per document)
//! - Declarative record schemas drive both validation and `/schema`
//!
//! # Degraded mode
//!
//! If `DATABASE_URL` is unset or the database is unreachable at startup,
//! the server still comes up: storage-dependent endpoints answer 503 while
//! `/schema` and `/health` keep working.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use vitrine_server::config::ServerConfig;
use vitrine_server::db::{DocumentStore, PgStore};
use vitrine_server::routes;
use vitrine_server::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vitrine_server=info,tower_http=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Connect the document store; fall back to the degraded state instead
    // of refusing to start.
    let store: Arc<dyn DocumentStore> = match &config.database_url {
        Some(url) => match PgStore::connect(url).await {
            Ok(store) => {
                tracing::info!("document store connected");
                Arc::new(store)
            }
            Err(err) => {
                tracing::warn!(error = %err, "document store unreachable, starting degraded");
                Arc::new(PgStore::unavailable())
            }
        },
        None => {
            tracing::warn!("DATABASE_URL not set, starting degraded");
            Arc::new(PgStore::unavailable())
        }
    };

    let state = AppState::new(config.clone(), store);

    // Build router. CORS is wide open, matching the public demo surface.
    let app = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("vitrine-server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies document-store connectivity before returning OK.
/// Returns 503 Service Unavailable if the store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().storage_ready().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
