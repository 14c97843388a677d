//! Chart-ready curve samples.

use qtty::Days;
use serde::{Deserialize, Serialize};

/// One point of a raw light curve.
///
/// `flux` and `detrended` differ only by the linear trend term applied by the
/// synthesizer. Both are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluxSample {
    /// Observation time in days since the start of the series
    pub time: Days,
    /// Relative brightness, nominally near 1.0
    pub flux: f64,
    /// Flux with the long-term trend removed
    pub detrended: f64,
}

/// One point of a phase-folded curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseSample {
    /// Orbital phase in [0, 1)
    pub phase: f64,
    pub flux: f64,
}

/// Round to a fixed number of decimal places for display stability.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
