//! Data Transfer Objects for the HTTP API.

use std::collections::BTreeMap;

use qtty::Days;
use serde::{Deserialize, Serialize};

use crate::models::{
    CandidateRecord, FeatureMode, FeedbackOutcome, FluxSample, KoiFeatures, PhaseSample,
    PredictionResult,
};
use crate::prediction::LeaderboardEntry;
use crate::services::{ConfidencePolicy, LightCurveParams, PhaseFoldParams};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Number of candidates in the registry
    pub candidates: usize,
    /// Whether a remote prediction service is configured
    pub prediction_service: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Response for listing candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateListResponse {
    pub candidates: Vec<CandidateRecord>,
    pub total: usize,
}

/// Query parameters for candidate classification.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClassificationQuery {
    /// `direct` or `disposition`; the server default otherwise
    #[serde(default)]
    pub policy: Option<String>,
    /// Report the fallback confidence instead of 404 for unknown ids
    #[serde(default)]
    pub fallback: Option<bool>,
}

/// Classification of a single candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResponse {
    pub candidate_id: String,
    pub policy: ConfidencePolicy,
    pub confidence: f64,
    pub is_planet: bool,
    /// True when the fallback confidence was used for an unknown id
    pub fallback: bool,
}

/// Query parameters for the raw light curve.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LightCurveQuery {
    #[serde(default)]
    pub has_planet: Option<bool>,
    #[serde(default)]
    pub samples: Option<usize>,
    /// Sampling interval in days
    #[serde(default)]
    pub interval: Option<f64>,
    /// Orbital period in days
    #[serde(default)]
    pub period: Option<f64>,
    #[serde(default)]
    pub depth: Option<f64>,
    /// Transit duration in days
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl LightCurveQuery {
    pub fn params(&self) -> LightCurveParams {
        let defaults = LightCurveParams::default();
        LightCurveParams {
            sample_count: self.samples.unwrap_or(defaults.sample_count),
            interval: self.interval.map(Days::new).unwrap_or(defaults.interval),
            period: self.period.map(Days::new).unwrap_or(defaults.period),
            transit_depth: self.depth.unwrap_or(defaults.transit_depth),
            transit_duration: self.duration.map(Days::new).unwrap_or(defaults.transit_duration),
        }
    }
}

/// Transit window bounds in days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransitWindow {
    pub start: Days,
    pub end: Days,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightCurveResponse {
    pub has_planet: bool,
    pub seed: Option<u64>,
    pub params: LightCurveParams,
    /// Empty when `has_planet` is false
    pub transit_windows: Vec<TransitWindow>,
    pub samples: Vec<FluxSample>,
}

/// Query parameters for the folded curve.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FoldedCurveQuery {
    #[serde(default)]
    pub period: Option<f64>,
    #[serde(default)]
    pub samples: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl FoldedCurveQuery {
    pub fn params(&self) -> PhaseFoldParams {
        let defaults = PhaseFoldParams::default();
        PhaseFoldParams {
            period: self.period.map(Days::new).unwrap_or(defaults.period),
            sample_count: self.samples.unwrap_or(defaults.sample_count),
            ..defaults
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldedCurveResponse {
    pub period: Days,
    pub seed: Option<u64>,
    pub samples: Vec<PhaseSample>,
}

/// Query parameters for a candidate's chart bundle.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CandidateCurvesQuery {
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Classification plus illustrative curves for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateCurvesResponse {
    pub candidate: CandidateRecord,
    pub prediction: PredictionResult,
    pub seed: Option<u64>,
    pub light_curve: Vec<FluxSample>,
    pub folded_curve: Vec<PhaseSample>,
}

/// Request body for the remote prediction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PredictRequest {
    #[serde(default)]
    pub mode: FeatureMode,
    /// Feature values by name; `null` marks a blank field
    #[serde(default)]
    pub features: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: String,
    pub probability: f64,
    pub is_planet: bool,
    /// The completed feature vector that was sent to the model
    pub features: KoiFeatures,
}

/// Leaderboard row with its 1-based rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub username: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<RankedEntry>,
    pub total: usize,
}

impl LeaderboardResponse {
    /// Rank entries in the order the service returned them.
    pub fn ranked(entries: Vec<LeaderboardEntry>) -> Self {
        let entries: Vec<RankedEntry> = entries
            .into_iter()
            .enumerate()
            .map(|(i, e)| RankedEntry {
                rank: i + 1,
                username: e.username,
                score: e.score,
            })
            .collect();
        Self {
            total: entries.len(),
            entries,
        }
    }
}

/// Acknowledgement returned for `POST /v1/feedback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    #[serde(flatten)]
    pub outcome: FeedbackOutcome,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_curve_query_defaults() {
        let params = LightCurveQuery::default().params();
        assert_eq!(params, LightCurveParams::default());

        let query = LightCurveQuery {
            samples: Some(10),
            period: Some(2.0),
            ..Default::default()
        };
        let params = query.params();
        assert_eq!(params.sample_count, 10);
        assert_eq!(params.period.value(), 2.0);
        assert_eq!(params.transit_duration.value(), 0.2);
    }

    #[test]
    fn test_folded_query_defaults() {
        let params = FoldedCurveQuery { period: Some(7.0), ..Default::default() }.params();
        assert_eq!(params.period.value(), 7.0);
        assert_eq!(params.sample_count, 200);
        assert_eq!(params.transit_center, 0.5);
    }

    #[test]
    fn test_leaderboard_ranks_in_service_order() {
        let response = LeaderboardResponse::ranked(vec![
            LeaderboardEntry { username: "vera".into(), score: 12.0 },
            LeaderboardEntry { username: "carl".into(), score: 30.0 },
        ]);
        assert_eq!(response.total, 2);
        assert_eq!(response.entries[0].rank, 1);
        assert_eq!(response.entries[0].username, "vera");
        assert_eq!(response.entries[1].rank, 2);
    }

    #[test]
    fn test_predict_request_accepts_nulls() {
        let request: PredictRequest = serde_json::from_str(
            r#"{"mode": "advanced", "features": {"koi_period": 3.2, "ra": null}}"#,
        )
        .unwrap();
        assert_eq!(request.mode, FeatureMode::Advanced);
        assert_eq!(request.features.get("koi_period"), Some(&Some(3.2)));
        assert_eq!(request.features.get("ra"), Some(&None));

        let request: PredictRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.mode, FeatureMode::Simple);
        assert!(request.features.is_empty());
    }
}
