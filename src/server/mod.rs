//! HTTP service around a single [`Estimator`](crate::model::Estimator).
//!
//! The service owns one estimator for the lifetime of the process, decodes
//! requests into arrays, forwards them to the estimator and maps its errors
//! onto status codes.

mod api;
mod error;
mod handlers;
pub mod schema;
mod state;

pub use api::create_router;
pub use error::ServerError;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

/// Server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,
    pub rank_tolerance: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(16 * 1024 * 1024), // 16MB
            rank_tolerance: std::env::var("RANK_TOLERANCE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(f64::EPSILON.sqrt()),
        }
    }
}

/// Start the server with the given configuration
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config.clone())?);
    let start_time = state.started_at;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(
        address = %addr,
        max_body_size_mb = config.max_body_size / 1024 / 1024,
        rank_tolerance = config.rank_tolerance,
        started_at = %start_time.to_rfc3339(),
        "Regression server starting"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        address = %addr,
        pid = std::process::id(),
        "Server listening and ready to accept connections"
    );

    // Graceful shutdown on ctrl+c
    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(detail = %e, "Failed to listen for the shutdown signal");
            std::future::pending::<()>().await;
        }
        let stop_time = chrono::Utc::now();
        let uptime = stop_time.signed_duration_since(start_time);
        info!(
            stopped_at = %stop_time.to_rfc3339(),
            uptime_secs = uptime.num_seconds(),
            "Shutdown signal received, stopping server gracefully"
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}
