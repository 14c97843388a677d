//! Service layer: curve synthesis, classification and feature extraction.
//!
//! All services are synchronous and side-effect free apart from drawing from
//! the supplied [`NoiseSource`], so they can be called from any context,
//! including async handlers, without blocking.

pub mod classifier;

pub mod curve_stats;

pub mod light_curve;

pub mod noise;

pub mod phase_fold;

pub use classifier::{decide, CandidateClassifier, ConfidencePolicy, PLANET_THRESHOLD};
pub use curve_stats::{extract_features, CurveFeatures, CurveInput};
pub use light_curve::{synthesize_light_curve, transit_windows, LightCurveParams};
pub use noise::NoiseSource;
pub use phase_fold::{synthesize_folded_curve, PhaseFoldParams};
