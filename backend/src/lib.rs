//! # Exohunt Backend
//!
//! Core of the exoplanet-hunting demo: synthetic transit light curves, a
//! confidence-threshold candidate classifier and a thin client for the remote
//! ML prediction service, exposed to the React frontend through a REST API.
//!
//! ## Architecture
//!
//! - [`models`]: Curve samples, candidate records and the KOI feature vector
//! - [`registry`]: Immutable, injectable candidate registry
//! - [`services`]: Curve synthesis, classification and curve feature extraction
//! - [`prediction`]: Client for the remote prediction service
//! - [`config`]: TOML and environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use exohunt::registry::CandidateRegistry;
//! use exohunt::services::{
//!     synthesize_light_curve, CandidateClassifier, ConfidencePolicy, LightCurveParams, NoiseSource,
//! };
//!
//! let classifier = CandidateClassifier::new(
//!     Arc::new(CandidateRegistry::builtin()?),
//!     ConfidencePolicy::DirectConfidence,
//! );
//! let result = classifier.classify("KIC-11904151")?;
//! assert!(result.is_planet);
//!
//! let mut noise = NoiseSource::seeded(42);
//! let curve = synthesize_light_curve(result.is_planet, &LightCurveParams::default(), &mut noise)?;
//! assert_eq!(curve.len(), 100);
//! # Ok::<(), exohunt::ExoError>(())
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod prediction;
pub mod registry;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{ExoError, ExoResult};
