//! Proficiency classification from accumulated wrong rates.

use serde::{Deserialize, Serialize};

/// Proficiency bucket for a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryLevel {
    New,
    Weak,
    Moderate,
    Strong,
}

impl MasteryLevel {
    /// Wrong-rate percentage at or above which a word counts as weak.
    pub const WEAK_THRESHOLD: f64 = 70.0;
    /// Wrong-rate percentage at or above which a word counts as moderate.
    pub const MODERATE_THRESHOLD: f64 = 30.0;

    /// Classify from a wrong-rate percentage; `None` means never studied.
    pub fn from_wrong_rate(wrong_rate: Option<f64>) -> Self {
        match wrong_rate {
            None => Self::New,
            Some(rate) if rate >= Self::WEAK_THRESHOLD => Self::Weak,
            Some(rate) if rate >= Self::MODERATE_THRESHOLD => Self::Moderate,
            Some(_) => Self::Strong,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }
}
