//! Kudos Proxy
//!
//! Server-side collaborator of the reviews section. Keeps the Places API key
//! off the client and relays avatar images so the browser never talks to the
//! image host directly.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ProxyConfig;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Proxy error
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// HTTP client construction error
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the application state for a configuration
///
/// Resolves the API key (config file first, then environment) and applies
/// the upstream request timeout.
pub fn build_state(config: &ProxyConfig) -> Result<AppState, ProxyError> {
    let api_key = config.resolve_api_key();
    if api_key.is_none() {
        warn!("No Places API key configured; /api/google-places will answer 500");
    }

    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }

    Ok(AppState::with_client(
        builder.build()?,
        api_key,
        &config.places_base_url,
    ))
}

/// Start the proxy HTTP server
pub async fn start_server(config: ProxyConfig) -> Result<(), ProxyError> {
    info!("Starting Kudos proxy");
    info!("Bind address: {}", config.bind_addr());
    info!("Places upstream: {}", config.places_base_url);

    let app = create_router(build_state(&config)?);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Proxy listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ProxyError::Server(e.to_string()))?;

    Ok(())
}
