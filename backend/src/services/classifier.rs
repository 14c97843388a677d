//! Threshold classification of registry candidates.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ExoError, ExoResult};
use crate::models::{
    CandidateRecord, Disposition, FeedbackOutcome, FeedbackSubmission, PredictionResult,
};
use crate::registry::CandidateRegistry;

/// Confidence strictly above this marks a planet.
pub const PLANET_THRESHOLD: f64 = 0.6;

/// Confidence reported by [`CandidateClassifier::classify_or_default`] for unknown ids.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Confidence assigned under [`ConfidencePolicy::DispositionLabel`].
pub const DISPOSITION_PLANET_CONFIDENCE: f64 = 0.9;
pub const DISPOSITION_FALSE_POSITIVE_CONFIDENCE: f64 = 0.2;

/// How a candidate's confidence is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidencePolicy {
    /// Use the record's precomputed confidence field.
    #[default]
    #[serde(alias = "direct")]
    DirectConfidence,
    /// 0.2 for a "FALSE POSITIVE" disposition, 0.9 otherwise.
    #[serde(alias = "disposition")]
    DispositionLabel,
}

impl ConfidencePolicy {
    pub fn confidence_for(&self, record: &CandidateRecord) -> f64 {
        match self {
            ConfidencePolicy::DirectConfidence => record.confidence,
            ConfidencePolicy::DispositionLabel => match record.features.disposition {
                Disposition::FalsePositive => DISPOSITION_FALSE_POSITIVE_CONFIDENCE,
                Disposition::Confirmed | Disposition::Candidate => DISPOSITION_PLANET_CONFIDENCE,
            },
        }
    }
}

impl FromStr for ConfidencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" | "direct_confidence" => Ok(ConfidencePolicy::DirectConfidence),
            "disposition" | "disposition_label" => Ok(ConfidencePolicy::DispositionLabel),
            other => Err(format!(
                "Unknown confidence policy: {} (expected 'direct' or 'disposition')",
                other
            )),
        }
    }
}

impl fmt::Display for ConfidencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidencePolicy::DirectConfidence => write!(f, "direct"),
            ConfidencePolicy::DispositionLabel => write!(f, "disposition"),
        }
    }
}

/// Apply the planet threshold to a confidence value.
pub fn decide(confidence: f64) -> PredictionResult {
    PredictionResult {
        confidence,
        is_planet: confidence > PLANET_THRESHOLD,
    }
}

/// Classifies candidates from an injected registry.
#[derive(Debug, Clone)]
pub struct CandidateClassifier {
    registry: Arc<CandidateRegistry>,
    policy: ConfidencePolicy,
}

impl CandidateClassifier {
    pub fn new(registry: Arc<CandidateRegistry>, policy: ConfidencePolicy) -> Self {
        Self { registry, policy }
    }

    pub fn policy(&self) -> ConfidencePolicy {
        self.policy
    }

    /// Same registry, different policy.
    pub fn with_policy(&self, policy: ConfidencePolicy) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            policy,
        }
    }

    pub fn registry(&self) -> &CandidateRegistry {
        &self.registry
    }

    pub fn lookup(&self, candidate_id: &str) -> ExoResult<&CandidateRecord> {
        self.registry
            .get(candidate_id)
            .ok_or_else(|| ExoError::not_found(candidate_id))
    }

    /// Classify a candidate, failing with `NotFound` for unknown ids.
    pub fn classify(&self, candidate_id: &str) -> ExoResult<PredictionResult> {
        let record = self.lookup(candidate_id)?;
        Ok(decide(self.policy.confidence_for(record)))
    }

    /// Classify a candidate, reporting [`FALLBACK_CONFIDENCE`] (not a planet)
    /// for unknown ids instead of failing.
    pub fn classify_or_default(&self, candidate_id: &str) -> PredictionResult {
        match self.classify(candidate_id) {
            Ok(result) => result,
            Err(e) => {
                warn!("{}; using fallback confidence {}", e, FALLBACK_CONFIDENCE);
                decide(FALLBACK_CONFIDENCE)
            }
        }
    }

    /// Check a user's verdict against the model decision and log it.
    ///
    /// The decision shown to the user wins over the registry classification.
    /// An unknown candidate id is rejected with `NotFound`.
    pub fn review_feedback(&self, submission: FeedbackSubmission) -> ExoResult<FeedbackOutcome> {
        let registry_decision = match submission.candidate_id.as_deref() {
            Some(id) => Some(self.classify(id)?.is_planet),
            None => None,
        };
        let model_is_planet = submission.model_is_planet.or(registry_decision);

        let outcome = FeedbackOutcome {
            recorded: true,
            is_planet: submission.is_planet,
            agrees_with_model: model_is_planet.map(|m| m == submission.is_planet),
            candidate_id: submission.candidate_id,
        };
        info!(
            "User feedback: {} (candidate {}, agrees with model: {:?})",
            outcome.label(),
            outcome.candidate_id.as_deref().unwrap_or("-"),
            outcome.agrees_with_model
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(policy: ConfidencePolicy) -> CandidateClassifier {
        CandidateClassifier::new(Arc::new(CandidateRegistry::builtin().unwrap()), policy)
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(!decide(0.6).is_planet);
        assert!(decide(0.6000001).is_planet);
        assert!(!decide(0.5).is_planet);
    }

    #[test]
    fn test_direct_policy() {
        let c = classifier(ConfidencePolicy::DirectConfidence);
        let result = c.classify("KIC-11904151").unwrap();
        assert_eq!(result.confidence, 0.96);
        assert!(result.is_planet);

        let result = c.classify("TIC-400799224").unwrap();
        assert_eq!(result.confidence, 0.15);
        assert!(!result.is_planet);
    }

    #[test]
    fn test_disposition_policy() {
        let c = classifier(ConfidencePolicy::DispositionLabel);
        let result = c.classify("TIC-168789840").unwrap();
        assert_eq!(result.confidence, DISPOSITION_PLANET_CONFIDENCE);
        assert!(result.is_planet);

        let result = c.classify("KIC-8462852").unwrap();
        assert_eq!(result.confidence, DISPOSITION_FALSE_POSITIVE_CONFIDENCE);
        assert!(!result.is_planet);
    }

    #[test]
    fn test_policies_agree_on_builtin_decisions() {
        let direct = classifier(ConfidencePolicy::DirectConfidence);
        let label = direct.with_policy(ConfidencePolicy::DispositionLabel);
        for record in direct.registry().list() {
            assert_eq!(
                direct.classify(&record.id).unwrap().is_planet,
                label.classify(&record.id).unwrap().is_planet,
                "{}",
                record.id
            );
        }
    }

    #[test]
    fn test_feedback_against_registry() {
        let c = classifier(ConfidencePolicy::default());
        let outcome = c
            .review_feedback(FeedbackSubmission {
                is_planet: true,
                candidate_id: Some("KIC-11904151".to_string()),
                model_is_planet: None,
            })
            .unwrap();
        assert!(outcome.recorded);
        assert_eq!(outcome.agrees_with_model, Some(true));

        let outcome = c
            .review_feedback(FeedbackSubmission {
                is_planet: true,
                candidate_id: Some("TIC-400799224".to_string()),
                model_is_planet: None,
            })
            .unwrap();
        assert_eq!(outcome.agrees_with_model, Some(false));
    }

    #[test]
    fn test_feedback_without_candidate() {
        let c = classifier(ConfidencePolicy::default());
        let outcome = c
            .review_feedback(FeedbackSubmission {
                is_planet: false,
                candidate_id: None,
                model_is_planet: None,
            })
            .unwrap();
        assert_eq!(outcome.agrees_with_model, None);
        assert_eq!(outcome.label(), "False Positive");

        // Shown decision overrides the registry
        let outcome = c
            .review_feedback(FeedbackSubmission {
                is_planet: false,
                candidate_id: Some("KIC-11904151".to_string()),
                model_is_planet: Some(false),
            })
            .unwrap();
        assert_eq!(outcome.agrees_with_model, Some(true));

        let err = c
            .review_feedback(FeedbackSubmission {
                is_planet: true,
                candidate_id: Some("unknown-id".to_string()),
                model_is_planet: Some(true),
            })
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unknown_id() {
        let c = classifier(ConfidencePolicy::default());
        assert_eq!(
            c.classify("unknown-id").unwrap_err(),
            ExoError::not_found("unknown-id")
        );
        let fallback = c.classify_or_default("unknown-id");
        assert_eq!(fallback.confidence, 0.5);
        assert!(!fallback.is_planet);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("direct".parse(), Ok(ConfidencePolicy::DirectConfidence));
        assert_eq!(" Disposition ".parse(), Ok(ConfidencePolicy::DispositionLabel));
        assert!("coin_flip".parse::<ConfidencePolicy>().is_err());
        assert_eq!(ConfidencePolicy::DispositionLabel.to_string(), "disposition");
    }
}
