//! KOI feature vector consumed by the remote prediction model.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ExoError, ExoResult};

/// Canonical feature order, as presented to the user and the model.
pub const KOI_FEATURE_NAMES: [&str; 14] = [
    "koi_period",
    "koi_time0bk",
    "koi_impact",
    "koi_duration",
    "koi_depth",
    "koi_prad",
    "koi_teq",
    "koi_insol",
    "koi_model_snr",
    "koi_steff",
    "koi_slogg",
    "koi_srad",
    "ra",
    "dec",
];

/// How user-supplied features are completed before prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureMode {
    /// A handful of sliders; everything else comes from [`KoiFeatures::default`].
    #[default]
    Simple,
    /// Every feature must be supplied explicitly.
    Advanced,
}

impl FromStr for FeatureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(FeatureMode::Simple),
            "advanced" => Ok(FeatureMode::Advanced),
            other => Err(format!("Unknown feature mode: {}", other)),
        }
    }
}

/// Complete set of Kepler Object of Interest features.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KoiFeatures {
    /// Orbital period in days
    pub koi_period: f64,
    /// Time of first transit center in BKJD
    pub koi_time0bk: f64,
    pub koi_impact: f64,
    /// Transit duration in hours
    pub koi_duration: f64,
    /// Transit depth in ppm
    pub koi_depth: f64,
    /// Planet radius in Earth radii
    pub koi_prad: f64,
    /// Equilibrium temperature in Kelvin
    pub koi_teq: f64,
    /// Insolation flux in Earth flux units
    pub koi_insol: f64,
    pub koi_model_snr: f64,
    /// Stellar effective temperature in Kelvin
    pub koi_steff: f64,
    /// Stellar surface gravity (cgs)
    pub koi_slogg: f64,
    /// Stellar radius in Solar radii
    pub koi_srad: f64,
    /// Right ascension in degrees
    pub ra: f64,
    /// Declination in degrees
    pub dec: f64,
}

impl Default for KoiFeatures {
    fn default() -> Self {
        Self {
            koi_period: 18.2,
            koi_time0bk: 140.0,
            koi_impact: 0.5,
            koi_duration: 4.5,
            koi_depth: 1500.0,
            koi_prad: 2.5,
            koi_teq: 900.0,
            koi_insol: 1.0,
            koi_model_snr: 25.0,
            koi_steff: 5800.0,
            koi_slogg: 4.4,
            koi_srad: 1.0,
            ra: 290.0,
            dec: 44.0,
        }
    }
}

impl KoiFeatures {
    fn slot_mut(&mut self, name: &str) -> Option<&mut f64> {
        let slot = match name {
            "koi_period" => &mut self.koi_period,
            "koi_time0bk" => &mut self.koi_time0bk,
            "koi_impact" => &mut self.koi_impact,
            "koi_duration" => &mut self.koi_duration,
            "koi_depth" => &mut self.koi_depth,
            "koi_prad" => &mut self.koi_prad,
            "koi_teq" => &mut self.koi_teq,
            "koi_insol" => &mut self.koi_insol,
            "koi_model_snr" => &mut self.koi_model_snr,
            "koi_steff" => &mut self.koi_steff,
            "koi_slogg" => &mut self.koi_slogg,
            "koi_srad" => &mut self.koi_srad,
            "ra" => &mut self.ra,
            "dec" => &mut self.dec,
            _ => return None,
        };
        Some(slot)
    }

    /// Look up a feature by its canonical name.
    pub fn get(&self, name: &str) -> Option<f64> {
        let value = match name {
            "koi_period" => self.koi_period,
            "koi_time0bk" => self.koi_time0bk,
            "koi_impact" => self.koi_impact,
            "koi_duration" => self.koi_duration,
            "koi_depth" => self.koi_depth,
            "koi_prad" => self.koi_prad,
            "koi_teq" => self.koi_teq,
            "koi_insol" => self.koi_insol,
            "koi_model_snr" => self.koi_model_snr,
            "koi_steff" => self.koi_steff,
            "koi_slogg" => self.koi_slogg,
            "koi_srad" => self.koi_srad,
            "ra" => self.ra,
            "dec" => self.dec,
            _ => return None,
        };
        Some(value)
    }

    /// Build a feature vector from user inputs.
    ///
    /// `None` values stand for blank form fields. In simple mode they (and any
    /// absent feature) take the default; in advanced mode every feature must be
    /// present, and the error lists all missing names in canonical order.
    pub fn from_inputs(mode: FeatureMode, inputs: &BTreeMap<String, Option<f64>>) -> ExoResult<Self> {
        let mut features = KoiFeatures::default();

        for (name, value) in inputs {
            let slot = features
                .slot_mut(name)
                .ok_or_else(|| ExoError::invalid(name.as_str(), "unknown feature"))?;
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(ExoError::invalid(name.as_str(), "must be a finite number"));
                }
                *slot = *v;
            }
        }

        if mode == FeatureMode::Advanced {
            let missing: Vec<&str> = KOI_FEATURE_NAMES
                .iter()
                .copied()
                .filter(|name| !matches!(inputs.get(*name), Some(Some(_))))
                .collect();
            if !missing.is_empty() {
                return Err(ExoError::invalid(
                    "features",
                    format!(
                        "Please fill in all feature fields. Missing: {}",
                        missing.join(", ")
                    ),
                ));
            }
        }

        Ok(features)
    }
}
