//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer. The core services are synchronous and cheap, so they run inline.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{info, warn};

use super::dto::{
    CandidateCurvesQuery, CandidateCurvesResponse, CandidateListResponse, ClassificationQuery,
    ClassificationResponse, FeedbackResponse, FoldedCurveQuery, FoldedCurveResponse,
    HealthResponse, LeaderboardResponse, LightCurveQuery, LightCurveResponse, PredictRequest,
    PredictResponse, TransitWindow,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{CandidateRecord, FeedbackSubmission, KoiFeatures};
use crate::prediction::PredictionService;
use crate::services::{
    extract_features, synthesize_folded_curve, synthesize_light_curve, transit_windows,
    ConfidencePolicy, CurveFeatures, CurveInput, LightCurveParams, NoiseSource, PhaseFoldParams,
};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        candidates: state.classifier.registry().len(),
        prediction_service: state.predictor.is_some(),
        timestamp: chrono::Utc::now(),
    }))
}

// =============================================================================
// Candidates
// =============================================================================

/// GET /v1/candidates
pub async fn list_candidates(State(state): State<AppState>) -> HandlerResult<CandidateListResponse> {
    let candidates = state.classifier.registry().list().to_vec();
    let total = candidates.len();
    Ok(Json(CandidateListResponse { candidates, total }))
}

/// GET /v1/candidates/{candidate_id}
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<String>,
) -> HandlerResult<CandidateRecord> {
    let record = state.classifier.lookup(&candidate_id)?;
    Ok(Json(record.clone()))
}

/// GET /v1/candidates/{candidate_id}/prediction
///
/// Unknown ids yield 404 unless `fallback=true`, in which case the documented
/// fallback confidence is reported and flagged.
pub async fn classify_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<String>,
    Query(query): Query<ClassificationQuery>,
) -> HandlerResult<ClassificationResponse> {
    let classifier = match query.policy.as_deref() {
        Some(raw) => {
            let policy: ConfidencePolicy = raw.parse().map_err(AppError::BadRequest)?;
            state.classifier.with_policy(policy)
        }
        None => state.classifier.clone(),
    };

    let (result, fallback) = if query.fallback.unwrap_or(false) {
        let known = classifier.registry().get(&candidate_id).is_some();
        (classifier.classify_or_default(&candidate_id), !known)
    } else {
        (classifier.classify(&candidate_id)?, false)
    };

    Ok(Json(ClassificationResponse {
        candidate_id,
        policy: classifier.policy(),
        confidence: result.confidence,
        is_planet: result.is_planet,
        fallback,
    }))
}

/// GET /v1/candidates/{candidate_id}/light-curve
///
/// The curves are seeded by the classification outcome only; the candidate's
/// physical parameters do not shape them.
pub async fn get_candidate_curves(
    State(state): State<AppState>,
    Path(candidate_id): Path<String>,
    Query(query): Query<CandidateCurvesQuery>,
) -> HandlerResult<CandidateCurvesResponse> {
    let candidate = state.classifier.lookup(&candidate_id)?.clone();
    let prediction = state.classifier.classify(&candidate_id)?;

    let mut noise = NoiseSource::from_optional_seed(query.seed);
    let light_curve =
        synthesize_light_curve(prediction.is_planet, &LightCurveParams::default(), &mut noise)?;
    let folded_curve = synthesize_folded_curve(&PhaseFoldParams::default(), &mut noise)?;

    Ok(Json(CandidateCurvesResponse {
        candidate,
        prediction,
        seed: query.seed,
        light_curve,
        folded_curve,
    }))
}

// =============================================================================
// Synthetic Curves
// =============================================================================

/// GET /v1/light-curve
pub async fn get_light_curve(Query(query): Query<LightCurveQuery>) -> HandlerResult<LightCurveResponse> {
    let has_planet = query.has_planet.unwrap_or(true);
    let params = query.params();

    let mut noise = NoiseSource::from_optional_seed(query.seed);
    let samples = synthesize_light_curve(has_planet, &params, &mut noise)?;

    let windows = if has_planet {
        transit_windows(&params)?
            .into_iter()
            .map(|(start, end)| TransitWindow { start, end })
            .collect()
    } else {
        Vec::new()
    };

    Ok(Json(LightCurveResponse {
        has_planet,
        seed: query.seed,
        params,
        transit_windows: windows,
        samples,
    }))
}

/// GET /v1/folded-curve
pub async fn get_folded_curve(Query(query): Query<FoldedCurveQuery>) -> HandlerResult<FoldedCurveResponse> {
    let params = query.params();
    let mut noise = NoiseSource::from_optional_seed(query.seed);
    let samples = synthesize_folded_curve(&params, &mut noise)?;

    Ok(Json(FoldedCurveResponse {
        period: params.period,
        seed: query.seed,
        samples,
    }))
}

/// POST /v1/curve-features
pub async fn curve_features(Json(input): Json<CurveInput>) -> HandlerResult<CurveFeatures> {
    Ok(Json(extract_features(&input)?))
}

// =============================================================================
// Remote Prediction
// =============================================================================

/// POST /v1/predict
///
/// Completes the feature vector and forwards it to the prediction service.
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> HandlerResult<PredictResponse> {
    let features = KoiFeatures::from_inputs(request.mode, &request.features)?;

    let predictor = configured_predictor(&state)?;

    let remote = predictor.predict(&features).await.map_err(|e| {
        warn!("Prediction service call failed: {}", e);
        AppError::from(e)
    })?;

    info!(
        "Prediction: {} (probability {:.3})",
        remote.prediction, remote.probability
    );

    Ok(Json(PredictResponse {
        is_planet: remote.is_planet(),
        prediction: remote.prediction,
        probability: remote.probability,
        features,
    }))
}

/// GET /v1/leaderboard
///
/// Top hunters as ranked by the prediction service.
pub async fn leaderboard(State(state): State<AppState>) -> HandlerResult<LeaderboardResponse> {
    let predictor = configured_predictor(&state)?;

    let entries = predictor.leaderboard().await.map_err(|e| {
        warn!("Leaderboard fetch failed: {}", e);
        AppError::from(e)
    })?;

    Ok(Json(LeaderboardResponse::ranked(entries)))
}

fn configured_predictor(state: &AppState) -> Result<&dyn PredictionService, AppError> {
    state
        .predictor
        .as_deref()
        .ok_or_else(|| AppError::Unavailable("No prediction service is configured".to_string()))
}

// =============================================================================
// Human Validation
// =============================================================================

/// POST /v1/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(submission): Json<FeedbackSubmission>,
) -> HandlerResult<FeedbackResponse> {
    let outcome = state.classifier.review_feedback(submission)?;

    Ok(Json(FeedbackResponse {
        outcome,
        message: "Thank you! Your input helps train our AI model.".to_string(),
    }))
}
