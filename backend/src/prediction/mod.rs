//! Client side of the remote ML prediction service.
//!
//! The model itself lives in an external service; this module only shapes the
//! request, performs the HTTP calls and validates the answers. The same service
//! hosts the hunters' leaderboard.

pub mod client;
pub mod error;

pub use client::{
    parse_leaderboard, HttpPredictionClient, LeaderboardEntry, PredictionRequest,
    PredictionService, RemotePrediction,
};
pub use error::PredictionError;
