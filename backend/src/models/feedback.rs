use serde::{Deserialize, Serialize};

/// A user's own verdict on a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    pub is_planet: bool,
    /// Registry id the verdict refers to, if any
    #[serde(default)]
    pub candidate_id: Option<String>,
    /// Model decision the user was shown; overrides the registry classification
    #[serde(default)]
    pub model_is_planet: Option<bool>,
}

/// Acknowledgement of a recorded verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackOutcome {
    pub recorded: bool,
    pub is_planet: bool,
    pub candidate_id: Option<String>,
    /// `None` when there is no model decision to compare against
    pub agrees_with_model: Option<bool>,
}

impl FeedbackOutcome {
    pub fn label(&self) -> &'static str {
        if self.is_planet {
            "Planet"
        } else {
            "False Positive"
        }
    }
}
