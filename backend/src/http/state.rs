//! Application state for the HTTP server.

use std::sync::Arc;

use crate::prediction::PredictionService;
use crate::registry::CandidateRegistry;
use crate::services::{CandidateClassifier, ConfidencePolicy};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Classifier over the candidate registry
    pub classifier: CandidateClassifier,
    /// Remote model; `None` when no service URL is configured
    pub predictor: Option<Arc<dyn PredictionService>>,
}

impl AppState {
    pub fn new(
        registry: Arc<CandidateRegistry>,
        policy: ConfidencePolicy,
        predictor: Option<Arc<dyn PredictionService>>,
    ) -> Self {
        Self {
            classifier: CandidateClassifier::new(registry, policy),
            predictor,
        }
    }
}
