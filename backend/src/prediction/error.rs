//! Errors raised while talking to the prediction service.

/// Message used when the service fails without explaining why.
pub const GENERIC_FAILURE: &str = "An error occurred during analysis.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    /// Network failure, timeout or TLS error.
    #[error("Prediction service unreachable: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Prediction service returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The body could not be understood.
    #[error("Malformed prediction response: {0}")]
    Malformed(String),

    /// The client could not be constructed.
    #[error("Prediction client configuration error: {0}")]
    Configuration(String),
}
