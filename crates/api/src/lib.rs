//! # Slotbook API
//!
//! The API crate provides the web server for the Slotbook scheduling service.
//! It exposes JSON endpoints for creating provider availability, listing free
//! slots and booking or cancelling appointments.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Validate input and call into [`SlotPolicy`]
//! - **Middleware**: Map domain errors to HTTP responses
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework. Persistence is whatever
//! [`KeyValueStore`] the caller hands to [`start_server`].

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement the HTTP surface
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration as StdDuration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use chrono::Duration;
use eyre::{eyre, Result, WrapErr};
use slotbook_core::{KeyValueStore, SlotPolicy};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use slotbook_api::ApiState;
/// use slotbook_core::MemoryStore;
///
/// let state = ApiState::new(Arc::new(MemoryStore::new()), chrono::Duration::minutes(60));
/// let app = slotbook_api::app(Arc::new(state));
/// ```
pub struct ApiState {
    /// Scheduling rules over the configured store
    pub policy: SlotPolicy,

    /// Exact length required of a slot created through `POST .../slots`
    pub slot_duration: Duration,
}

impl ApiState {
    pub fn new(store: Arc<dyn KeyValueStore>, slot_duration: Duration) -> Self {
        Self {
            policy: SlotPolicy::new(store),
            slot_duration,
        }
    }
}

/// Installs the global tracing subscriber.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the application router with every route attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Banner, health check and version endpoints
        .merge(routes::health::routes())
        // Slot management and booking endpoints
        .merge(routes::appointments::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(origins))
}

/// Starts the API server on top of an already connected store
///
/// Tracing is expected to be initialised by the caller (see [`init_tracing`]).
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = slotbook_api::config::ApiConfig::from_env()?;
/// let store = slotbook_db::connect_store(&config.store).await?;
/// slotbook_api::start_server(config, store).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(
    config: config::ApiConfig,
    store: Arc<dyn KeyValueStore>,
) -> Result<()> {
    let slot_duration = Duration::try_minutes(config.slot_duration_minutes)
        .ok_or_else(|| eyre!("Slot duration out of range"))?;
    let state = Arc::new(ApiState::new(store, slot_duration));

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TimeoutLayer::new(StdDuration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
