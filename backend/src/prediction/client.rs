use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use super::error::{PredictionError, GENERIC_FAILURE};
use crate::models::KoiFeatures;

/// Label the service uses for rejected candidates.
pub const FALSE_POSITIVE_LABEL: &str = "False Positive";
pub const PLANET_LABEL: &str = "Planet";

/// Request body sent to the prediction service.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest<'a> {
    pub features: &'a KoiFeatures,
}

/// The label can arrive either as text or as a 0/1 class code.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Code(i64),
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    prediction: RawLabel,
    probability: f64,
}

/// Answer of the prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemotePrediction {
    pub prediction: String,
    /// Probability of the planet class, in [0, 1]
    pub probability: f64,
}

impl RemotePrediction {
    pub fn is_planet(&self) -> bool {
        self.prediction != FALSE_POSITIVE_LABEL
    }

    /// Parse and validate a response body.
    pub fn from_body(body: &str) -> Result<Self, PredictionError> {
        let raw: RawPrediction = serde_json::from_str(body)
            .map_err(|e| PredictionError::Malformed(e.to_string()))?;

        if !(0.0..=1.0).contains(&raw.probability) {
            return Err(PredictionError::Malformed(format!(
                "probability {} outside [0, 1]",
                raw.probability
            )));
        }

        let prediction = match raw.prediction {
            RawLabel::Text(label) => label,
            RawLabel::Code(0) => FALSE_POSITIVE_LABEL.to_string(),
            RawLabel::Code(_) => PLANET_LABEL.to_string(),
        };

        Ok(Self {
            prediction,
            probability: raw.probability,
        })
    }
}

/// One row of the hunters' leaderboard, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: f64,
}

/// Parse a leaderboard body, keeping the service's ranking order.
pub fn parse_leaderboard(body: &str) -> Result<Vec<LeaderboardEntry>, PredictionError> {
    serde_json::from_str(body).map_err(|e| PredictionError::Malformed(e.to_string()))
}

/// Extract the `error` field of a failure body, if any.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

/// Anything that can turn a feature vector into a prediction.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, features: &KoiFeatures) -> Result<RemotePrediction, PredictionError>;

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, PredictionError>;
}

/// HTTP client for the hosted prediction service.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    http: reqwest::Client,
    base_url: String,
    endpoint: String,
}

impl HttpPredictionClient {
    /// Create a client posting to `{base_url}/predict_ml` and reading
    /// `{base_url}/leaderboard`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PredictionError> {
        let base = base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(PredictionError::Configuration(
                "prediction base URL is empty".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PredictionError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base.to_string(),
            endpoint: format!("{}/predict_ml", base),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn leaderboard_url(&self) -> String {
        format!("{}/leaderboard", self.base_url)
    }
}

/// Read the body of a response, turning non-2xx statuses into errors.
async fn success_body(response: reqwest::Response) -> Result<String, PredictionError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| PredictionError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(PredictionError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(body)
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(&self, features: &KoiFeatures) -> Result<RemotePrediction, PredictionError> {
        debug!("POST {}", self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&PredictionRequest { features })
            .send()
            .await
            .map_err(|e| PredictionError::Transport(e.to_string()))?;

        let body = success_body(response).await?;
        RemotePrediction::from_body(&body)
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, PredictionError> {
        let url = self.leaderboard_url();
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| PredictionError::Transport(e.to_string()))?;

        let body = success_body(response).await?;
        parse_leaderboard(&body)
    }
}
