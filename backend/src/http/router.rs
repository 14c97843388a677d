//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for the demo frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Candidate registry
        .route("/candidates", get(handlers::list_candidates))
        .route("/candidates/{candidate_id}", get(handlers::get_candidate))
        .route("/candidates/{candidate_id}/prediction", get(handlers::classify_candidate))
        .route(
            "/candidates/{candidate_id}/light-curve",
            get(handlers::get_candidate_curves),
        )
        // Synthetic curves
        .route("/light-curve", get(handlers::get_light_curve))
        .route("/folded-curve", get(handlers::get_folded_curve))
        .route("/curve-features", post(handlers::curve_features))
        // Remote model
        .route("/predict", post(handlers::predict))
        .route("/leaderboard", get(handlers::leaderboard))
        // Human validation
        .route("/feedback", post(handlers::submit_feedback));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Uploaded light curves can hold long time series.
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
