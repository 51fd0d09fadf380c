//! Wood Traceability Platform - Backend Server
//!
//! Tracks EUDR-regulated wood from shipment declaration through goods
//! receipt and inventory to weekly production runs and batch reports.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;
mod store;

pub use config::Config;

use external::TracesClient;
use store::{JsonFileBackend, MemoryBackend, StorageBackend, Store};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<Config>,
    pub traces: TracesClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wtp_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Wood Traceability Platform Server");
    tracing::info!("Environment: {}", config.environment);

    // Open the storage backend
    let backend: Arc<dyn StorageBackend> = match config.storage.backend.as_str() {
        "json-file" => {
            tracing::info!("Using JSON file storage in {}", config.storage.data_dir);
            Arc::new(JsonFileBackend::new(&config.storage.data_dir)?)
        }
        "memory" => {
            tracing::info!("Using in-memory storage");
            Arc::new(MemoryBackend::new())
        }
        other => {
            return Err(error::AppError::Configuration(format!(
                "Unknown storage backend '{}'",
                other
            ))
            .into())
        }
    };
    let store = Store::new(backend);

    // Registry client for declaration lookups
    let traces = TracesClient::new(&config.traces);

    // Create application state
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        traces,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Wood Traceability Platform API v1.0"
}

/// Liveness endpoint
async fn health_check() -> &'static str {
    "OK"
}
