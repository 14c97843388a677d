//! Immutable registry of star/planet candidates.
//!
//! The registry is built once and handed to its consumers (usually behind an
//! `Arc`); nothing mutates it afterwards.

use std::collections::HashMap;

use qtty::{Days, Degrees, Hours};

use crate::error::{ExoError, ExoResult};
use crate::models::{CandidateFeatures, CandidateRecord, Disposition, Mission};

/// Read-only lookup table of [`CandidateRecord`]s keyed by id.
#[derive(Debug, Clone)]
pub struct CandidateRegistry {
    records: Vec<CandidateRecord>,
    index: HashMap<String, usize>,
}

impl CandidateRegistry {
    /// Build a registry, rejecting duplicate ids and out-of-range confidences.
    pub fn new(records: Vec<CandidateRecord>) -> ExoResult<Self> {
        let index = build_index(&records)?;
        Ok(Self { records, index })
    }

    /// The demo candidates shipped with the application, validated like any
    /// other record set.
    pub fn builtin() -> ExoResult<Self> {
        Self::new(builtin_records())
    }

    /// Look up a candidate by id.
    pub fn get(&self, id: &str) -> Option<&CandidateRecord> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    /// All candidates in insertion order.
    pub fn list(&self) -> &[CandidateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Map ids to positions, checking each record on the way.
fn build_index(records: &[CandidateRecord]) -> ExoResult<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(records.len());
    for (pos, record) in records.iter().enumerate() {
        if !(0.0..=1.0).contains(&record.confidence) {
            return Err(ExoError::invalid(
                "confidence",
                format!(
                    "candidate '{}' has confidence {} outside [0, 1]",
                    record.id, record.confidence
                ),
            ));
        }
        if index.insert(record.id.clone(), pos).is_some() {
            return Err(ExoError::invalid(
                "id",
                format!("duplicate candidate id '{}'", record.id),
            ));
        }
    }
    Ok(index)
}

/// Records behind [`CandidateRegistry::builtin`].
fn builtin_records() -> Vec<CandidateRecord> {
    vec![
        candidate(
            "KIC-11904151",
            "KIC-11904151",
            Mission::Kepler,
            0.96,
            0.837_49,
            131.512,
            1.81,
            285.679,
            50.241,
            Disposition::Confirmed,
        ),
        candidate(
            "TIC-307210830",
            "TIC-307210830",
            Mission::Tess,
            0.89,
            3.690_62,
            1_355.286,
            1.22,
            124.532,
            -68.313,
            Disposition::Confirmed,
        ),
        candidate(
            "KIC-8462852",
            "KIC-8462852 (Tabby's Star)",
            Mission::Kepler,
            0.42,
            19.614_87,
            137.447,
            5.93,
            301.564,
            44.457,
            Disposition::FalsePositive,
        ),
        candidate(
            "TIC-168789840",
            "TIC-168789840",
            Mission::Tess,
            0.78,
            10.288_41,
            1_412.863,
            3.06,
            71.376,
            -55.921,
            Disposition::Candidate,
        ),
        candidate(
            "KIC-12557548",
            "KIC-12557548",
            Mission::Kepler,
            0.91,
            0.653_55,
            131.774,
            1.56,
            290.966,
            51.505,
            Disposition::Confirmed,
        ),
        candidate(
            "TIC-400799224",
            "TIC-400799224",
            Mission::Tess,
            0.15,
            19.769_51,
            1_326.941,
            4.74,
            92.881,
            -54.013,
            Disposition::FalsePositive,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn candidate(
    id: &str,
    name: &str,
    mission: Mission,
    confidence: f64,
    period_days: f64,
    epoch_bkjd: f64,
    duration_hours: f64,
    ra_deg: f64,
    dec_deg: f64,
    disposition: Disposition,
) -> CandidateRecord {
    CandidateRecord {
        id: id.to_string(),
        name: name.to_string(),
        mission,
        confidence,
        features: CandidateFeatures {
            orbital_period: Days::new(period_days),
            transit_epoch: epoch_bkjd,
            transit_duration: Hours::new(duration_hours),
            ra: Degrees::new(ra_deg),
            dec: Degrees::new(dec_deg),
            disposition,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contents() {
        let registry = CandidateRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 6);
        assert!(!registry.is_empty());

        let ids: Vec<&str> = registry.list().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "KIC-11904151",
                "TIC-307210830",
                "KIC-8462852",
                "TIC-168789840",
                "KIC-12557548",
                "TIC-400799224",
            ]
        );

        let tabby = registry.get("KIC-8462852").unwrap();
        assert_eq!(tabby.name, "KIC-8462852 (Tabby's Star)");
        assert_eq!(tabby.confidence, 0.42);
        assert_eq!(tabby.mission, Mission::Kepler);
    }

    #[test]
    fn test_builtin_dispositions_agree_with_confidence() {
        let registry = CandidateRegistry::builtin().unwrap();
        for record in registry.list() {
            let false_positive = record.features.disposition == Disposition::FalsePositive;
            assert_eq!(false_positive, record.confidence <= 0.6, "{}", record.id);
        }
    }

    #[test]
    fn test_builtin_records_are_valid() {
        let records = builtin_records();
        let index = build_index(&records).unwrap();
        assert_eq!(index.len(), records.len());
        assert_eq!(index["TIC-400799224"], 5);
    }

    #[test]
    fn test_get_unknown() {
        assert!(CandidateRegistry::builtin().unwrap().get("unknown-id").is_none());
    }

    #[test]
    fn test_rejects_duplicates() {
        let record = CandidateRegistry::builtin().unwrap().list()[0].clone();
        let err = CandidateRegistry::new(vec![record.clone(), record]).unwrap_err();
        assert!(err.to_string().contains("duplicate candidate id"));
    }

    #[test]
    fn test_rejects_out_of_range_confidence() {
        let mut record = CandidateRegistry::builtin().unwrap().list()[0].clone();
        record.confidence = 1.2;
        assert!(CandidateRegistry::new(vec![record]).is_err());
    }

    #[test]
    fn test_empty_registry() {
        let registry = CandidateRegistry::new(vec![]).unwrap();
        assert!(registry.is_empty());
        assert!(registry.list().is_empty());
    }
}
