//! Summary features of an observed light curve.
//!
//! The flux is normalized by its median and flattened around 1.0 before the
//! statistics are taken. Folded bins are reserved placeholders (all zero) that
//! keep the vector shape the prediction model expects.

use serde::{Deserialize, Serialize};

use crate::error::{ExoError, ExoResult};

/// Number of phase bins in the folded part of the feature vector.
pub const FOLDED_BIN_COUNT: usize = 100;

/// Raw light curve as uploaded by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveInput {
    pub time: Vec<f64>,
    pub flux: Vec<f64>,
}

/// Statistical features of a flattened light curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveFeatures {
    pub std_dev_flux: f64,
    pub median_flux: f64,
    pub min_flux: f64,
    pub max_flux: f64,
    pub percentile_10: f64,
    pub percentile_90: f64,
    pub skewness_flux: f64,
    pub kurtosis_flux: f64,
    pub folded_bins: Vec<f64>,
}

/// Percentile with linear interpolation between closest ranks.
///
/// `sorted` must be non-empty and ascending.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

fn median(sorted: &[f64]) -> f64 {
    percentile(sorted, 50.0)
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Central moments m2, m3, m4 (population normalization).
fn central_moments(values: &[f64], mean: f64) -> (f64, f64, f64) {
    let n = values.len() as f64;
    let (s2, s3, s4) = values.iter().fold((0.0, 0.0, 0.0), |(s2, s3, s4), v| {
        let d = v - mean;
        let d2 = d * d;
        (s2 + d2, s3 + d2 * d, s4 + d2 * d2)
    });
    (s2 / n, s3 / n, s4 / n)
}

/// Bias-corrected sample skewness; 0 when undefined.
fn skewness(n: usize, m2: f64, m3: f64) -> f64 {
    if n < 3 || m2 <= f64::EPSILON * f64::EPSILON {
        return 0.0;
    }
    let n = n as f64;
    let g1 = m3 / m2.powf(1.5);
    (n * (n - 1.0)).sqrt() / (n - 2.0) * g1
}

/// Bias-corrected sample excess kurtosis; 0 when undefined.
fn kurtosis(n: usize, m2: f64, m4: f64) -> f64 {
    if n < 4 || m2 <= f64::EPSILON * f64::EPSILON {
        return 0.0;
    }
    let n = n as f64;
    let g2 = m4 / (m2 * m2) - 3.0;
    (n - 1.0) / ((n - 2.0) * (n - 3.0)) * ((n + 1.0) * g2 + 6.0)
}

/// Extract summary features from a light curve.
pub fn extract_features(input: &CurveInput) -> ExoResult<CurveFeatures> {
    if input.flux.is_empty() {
        return Err(ExoError::invalid("flux", "must contain at least one value"));
    }
    if input.time.len() != input.flux.len() {
        return Err(ExoError::invalid(
            "time",
            format!(
                "length {} does not match flux length {}",
                input.time.len(),
                input.flux.len()
            ),
        ));
    }
    if input.flux.iter().chain(input.time.iter()).any(|v| !v.is_finite()) {
        return Err(ExoError::invalid("flux", "all values must be finite"));
    }

    let raw_median = median(&sorted_copy(&input.flux));
    if raw_median == 0.0 {
        return Err(ExoError::invalid("flux", "median flux is zero; cannot normalize"));
    }

    let normalized: Vec<f64> = input.flux.iter().map(|f| f / raw_median).collect();
    let n = normalized.len();
    let norm_mean = normalized.iter().sum::<f64>() / n as f64;
    let flattened: Vec<f64> = normalized.iter().map(|v| v - norm_mean + 1.0).collect();

    let mean = flattened.iter().sum::<f64>() / n as f64;
    let (m2, m3, m4) = central_moments(&flattened, mean);
    let sorted = sorted_copy(&flattened);

    Ok(CurveFeatures {
        std_dev_flux: m2.sqrt(),
        median_flux: median(&sorted),
        min_flux: sorted[0],
        max_flux: sorted[n - 1],
        percentile_10: percentile(&sorted, 10.0),
        percentile_90: percentile(&sorted, 90.0),
        skewness_flux: skewness(n, m2, m3),
        kurtosis_flux: kurtosis(n, m2, m4),
        folded_bins: vec![0.0; FOLDED_BIN_COUNT],
    })
}
