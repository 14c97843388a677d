//! Synthetic raw light curves with optional periodic transits.
//!
//! The curve is illustrative: only the `has_planet` flag drives its shape, not
//! the physical parameters of any particular candidate.

use std::f64::consts::PI;

use log::debug;
use qtty::Days;
use serde::{Deserialize, Serialize};

use super::noise::NoiseSource;
use crate::error::{ExoError, ExoResult};
use crate::models::{round_to, FluxSample};

/// Total width of the uniform photometric noise band.
pub const RAW_NOISE_WIDTH: f64 = 0.01;

/// Slope of the linear trend removed from the detrended series (flux per day).
pub const DETREND_SLOPE: f64 = 0.0001;

/// Smallest sampling interval whose times stay distinct at display precision.
pub const MIN_INTERVAL_DAYS: f64 = 0.01;

/// Largest number of samples a single curve may hold.
pub const MAX_SAMPLE_COUNT: usize = 100_000;

/// Parameters of the synthetic light curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightCurveParams {
    pub sample_count: usize,
    /// Cadence between consecutive samples
    pub interval: Days,
    /// Orbital period
    pub period: Days,
    /// Peak fractional flux drop during transit
    pub transit_depth: f64,
    pub transit_duration: Days,
}

impl Default for LightCurveParams {
    fn default() -> Self {
        Self {
            sample_count: 100,
            interval: Days::new(0.1),
            period: Days::new(3.5),
            transit_depth: 0.02,
            transit_duration: Days::new(0.2),
        }
    }
}

impl LightCurveParams {
    /// Reject degenerate parameters before any division happens.
    pub fn validate(&self) -> ExoResult<()> {
        if self.sample_count == 0 || self.sample_count > MAX_SAMPLE_COUNT {
            return Err(ExoError::invalid(
                "sample_count",
                format!("must be between 1 and {}", MAX_SAMPLE_COUNT),
            ));
        }
        let interval = self.interval.value();
        if !interval.is_finite() || interval < MIN_INTERVAL_DAYS {
            return Err(ExoError::invalid(
                "interval",
                format!("must be a finite number of days >= {}", MIN_INTERVAL_DAYS),
            ));
        }
        // Times are scaled by 100 when rounded for display.
        if !(self.span() * 100.0).is_finite() {
            return Err(ExoError::invalid(
                "interval",
                "last sample time is not representable",
            ));
        }
        let period = self.period.value();
        if !period.is_finite() || period <= 0.0 {
            return Err(ExoError::invalid("period", "must be a finite number of days > 0"));
        }
        // At least one sample per orbit; also bounds the transit window count by sample_count.
        if period < interval {
            return Err(ExoError::invalid(
                "period",
                "must not be shorter than the sampling interval",
            ));
        }
        let duration = self.transit_duration.value();
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ExoError::invalid(
                "transit_duration",
                "must be a finite number of days > 0",
            ));
        }
        if duration > period {
            return Err(ExoError::invalid(
                "transit_duration",
                "must not exceed the orbital period",
            ));
        }
        if !self.transit_depth.is_finite() || self.transit_depth < 0.0 {
            return Err(ExoError::invalid("transit_depth", "must be a finite value >= 0"));
        }
        Ok(())
    }

    /// Transit duration as a fraction of the orbit.
    fn duration_phase(&self) -> f64 {
        self.transit_duration.value() / self.period.value()
    }

    /// Last sampled time, in days.
    fn span(&self) -> f64 {
        self.sample_count.saturating_sub(1) as f64 * self.interval.value()
    }
}

/// Flux decrement at `time` for a half-sine transit starting every period.
fn transit_dip(time: f64, params: &LightCurveParams) -> f64 {
    let period = params.period.value();
    let phase = (time % period) / period;
    let duration_phase = params.duration_phase();
    if phase < duration_phase {
        params.transit_depth * (PI * phase / duration_phase).sin()
    } else {
        0.0
    }
}

/// Generate a noisy light curve, with periodic transits when `has_planet`.
///
/// Times are rounded to 2 decimals and fluxes to 4; the detrended value is
/// derived from the unrounded flux.
pub fn synthesize_light_curve(
    has_planet: bool,
    params: &LightCurveParams,
    noise: &mut NoiseSource,
) -> ExoResult<Vec<FluxSample>> {
    params.validate()?;

    let interval = params.interval.value();
    let samples: Vec<FluxSample> = (0..params.sample_count)
        .map(|i| {
            let time = i as f64 * interval;
            let mut flux = 1.0 + noise.uniform_centered(RAW_NOISE_WIDTH);
            if has_planet {
                flux -= transit_dip(time, params);
            }
            let detrended = flux - DETREND_SLOPE * time;

            FluxSample {
                time: Days::new(round_to(time, 2)),
                flux: round_to(flux, 4),
                detrended: round_to(detrended, 4),
            }
        })
        .collect();

    debug!(
        "Synthesized light curve: {} samples, has_planet={}, period={}d",
        samples.len(),
        has_planet,
        params.period.value()
    );

    Ok(samples)
}

/// Transit windows `[start, end)` that begin within the sampled span.
pub fn transit_windows(params: &LightCurveParams) -> ExoResult<Vec<(Days, Days)>> {
    params.validate()?;

    let period = params.period.value();
    let duration = params.transit_duration.value();
    let span = params.span();

    let mut windows = Vec::new();
    let mut k = 0u64;
    loop {
        let start = k as f64 * period;
        if start > span {
            break;
        }
        windows.push((Days::new(start), Days::new(start + duration)));
        k += 1;
    }
    Ok(windows)
}
