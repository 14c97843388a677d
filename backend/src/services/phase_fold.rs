//! Synthetic phase-folded curves.
//!
//! Folding averages many orbits, so the noise band is half that of the raw
//! curve. A single transit is always drawn at the configured center; the
//! folded chart is illustrative and has no planet flag.

use std::f64::consts::PI;

use log::debug;
use qtty::Days;
use serde::{Deserialize, Serialize};

use super::light_curve::MAX_SAMPLE_COUNT;
use super::noise::NoiseSource;
use crate::error::{ExoError, ExoResult};
use crate::models::{round_to, PhaseSample};

/// Total width of the uniform noise band after folding.
pub const FOLDED_NOISE_WIDTH: f64 = 0.005;

/// Parameters of the folded curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseFoldParams {
    /// Orbital period; validated but does not change the shape
    pub period: Days,
    pub sample_count: usize,
    pub transit_depth: f64,
    /// Phase at the middle of the transit
    pub transit_center: f64,
    /// Half the transit width, in phase units
    pub transit_half_width: f64,
}

impl Default for PhaseFoldParams {
    fn default() -> Self {
        Self {
            period: Days::new(3.5),
            sample_count: 200,
            transit_depth: 0.02,
            transit_center: 0.5,
            transit_half_width: 0.05,
        }
    }
}

impl PhaseFoldParams {
    pub fn validate(&self) -> ExoResult<()> {
        if self.sample_count == 0 || self.sample_count > MAX_SAMPLE_COUNT {
            return Err(ExoError::invalid(
                "sample_count",
                format!("must be between 1 and {}", MAX_SAMPLE_COUNT),
            ));
        }
        let period = self.period.value();
        if !period.is_finite() || period <= 0.0 {
            return Err(ExoError::invalid("period", "must be a finite number of days > 0"));
        }
        if !self.transit_depth.is_finite() || self.transit_depth < 0.0 {
            return Err(ExoError::invalid("transit_depth", "must be a finite value >= 0"));
        }
        if !(self.transit_half_width > 0.0 && self.transit_half_width <= 0.5) {
            return Err(ExoError::invalid("transit_half_width", "must be in (0, 0.5]"));
        }
        if !(self.transit_center - self.transit_half_width >= 0.0
            && self.transit_center + self.transit_half_width <= 1.0)
        {
            return Err(ExoError::invalid(
                "transit_center",
                "transit window must lie within [0, 1]",
            ));
        }
        Ok(())
    }

    /// Whether `phase` falls strictly inside the transit window.
    pub fn in_transit(&self, phase: f64) -> bool {
        (phase - self.transit_center).abs() < self.transit_half_width
    }

    /// Flux decrement at `phase`: a half-sine mapped linearly over the window.
    fn dip(&self, phase: f64) -> f64 {
        if !self.in_transit(phase) {
            return 0.0;
        }
        let ingress = self.transit_center - self.transit_half_width;
        let transit_phase = ((phase - ingress) / (2.0 * self.transit_half_width)) * PI;
        self.transit_depth * transit_phase.sin()
    }
}

/// Generate a phase-folded curve sampled at `i / sample_count`.
pub fn synthesize_folded_curve(
    params: &PhaseFoldParams,
    noise: &mut NoiseSource,
) -> ExoResult<Vec<PhaseSample>> {
    params.validate()?;

    let n = params.sample_count as f64;
    let samples: Vec<PhaseSample> = (0..params.sample_count)
        .map(|i| {
            let phase = i as f64 / n;
            let flux = 1.0 + noise.uniform_centered(FOLDED_NOISE_WIDTH) - params.dip(phase);
            PhaseSample {
                phase: round_to(phase, 3),
                flux: round_to(flux, 4),
            }
        })
        .collect();

    debug!(
        "Synthesized folded curve: {} samples, period={}d",
        samples.len(),
        params.period.value()
    );

    Ok(samples)
}
