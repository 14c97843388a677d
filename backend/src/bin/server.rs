//! Exohunt HTTP Server Binary
//!
//! Loads configuration, builds the candidate registry and the optional
//! prediction client, then serves the REST API.
//!
//! # Usage
//!
//! ```bash
//! PREDICTION_API_URL=https://models.example.org cargo run --bin exohunt-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `PREDICTION_API_URL`: Remote prediction service base URL (optional)
//! - `PREDICTION_TIMEOUT_SECS`: Remote call timeout (default: 30)
//! - `CONFIDENCE_POLICY`: `direct` (default) or `disposition`
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use exohunt::config::ServerConfig;
use exohunt::http::{create_router, AppState};
use exohunt::prediction::{HttpPredictionClient, PredictionService};
use exohunt::registry::CandidateRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting exohunt HTTP server");

    let config = ServerConfig::from_default_location()?.with_env_overrides()?;

    let registry = Arc::new(CandidateRegistry::builtin()?);
    info!("Candidate registry loaded with {} entries", registry.len());

    let predictor: Option<Arc<dyn PredictionService>> = match &config.prediction.base_url {
        Some(url) => {
            let client = HttpPredictionClient::new(url, config.prediction.timeout())?;
            info!("Prediction service: {}", client.endpoint());
            Some(Arc::new(client))
        }
        None => {
            warn!("PREDICTION_API_URL not set; /v1/predict and /v1/leaderboard will answer 503");
            None
        }
    };

    info!("Confidence policy: {}", config.classifier.policy);
    let state = AppState::new(registry, config.classifier.policy, predictor);
    let app = create_router(state);

    let addr = config.socket_addr()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
