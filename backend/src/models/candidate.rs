//! Star/planet candidate reference data and classification results.

use std::fmt;
use std::str::FromStr;

use qtty::{Days, Degrees, Hours};
use serde::{Deserialize, Serialize};

/// Survey mission that observed the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mission {
    Kepler,
    #[serde(rename = "TESS")]
    Tess,
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mission::Kepler => write!(f, "Kepler"),
            Mission::Tess => write!(f, "TESS"),
        }
    }
}

/// Archive disposition label attached to a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disposition {
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "CANDIDATE")]
    Candidate,
    #[serde(rename = "FALSE POSITIVE")]
    FalsePositive,
}

impl Disposition {
    pub fn label(&self) -> &'static str {
        match self {
            Disposition::Confirmed => "CONFIRMED",
            Disposition::Candidate => "CANDIDATE",
            Disposition::FalsePositive => "FALSE POSITIVE",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Disposition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CONFIRMED" => Ok(Disposition::Confirmed),
            "CANDIDATE" => Ok(Disposition::Candidate),
            "FALSE POSITIVE" | "FALSE_POSITIVE" => Ok(Disposition::FalsePositive),
            other => Err(format!("Unknown disposition: {}", other)),
        }
    }
}

/// Astrophysical parameters recorded for a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFeatures {
    /// Orbital period
    pub orbital_period: Days,
    /// Time of first transit center (BKJD)
    pub transit_epoch: f64,
    /// Transit duration
    pub transit_duration: Hours,
    pub ra: Degrees,
    pub dec: Degrees,
    pub disposition: Disposition,
}

/// Static reference entry for a star/planet candidate.
///
/// Created once when the registry is built and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Unique identifier (e.g. `KIC-11904151`)
    pub id: String,
    /// Display name
    pub name: String,
    pub mission: Mission,
    /// Precomputed detection confidence in [0, 1]
    pub confidence: f64,
    pub features: CandidateFeatures,
}

/// Outcome of classifying a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Confidence in [0, 1]
    pub confidence: f64,
    pub is_planet: bool,
}
