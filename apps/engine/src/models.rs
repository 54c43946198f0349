//! Persistent entity types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use vocab_core::types::{ExamType, StudyMode, WordState};
use vocab_core::MasteryLevel;

/// A vocabulary entry. The term is its identity and never changes;
/// translation, memo and favorite flag are mutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    pub term: String,
    pub translation: String,
    pub memo: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

/// One immutable study event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub id: i64,
    pub word_id: i64,
    pub studied_at: DateTime<Utc>,
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<i64>,
    pub mode: StudyMode,
}

/// Per-word learning statistics (1:1 with words, created on first attempt).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordStatistics {
    pub word_id: i64,
    pub total_attempts: u32,
    pub correct_count: u32,
    pub wrong_count: u32,
    /// Consecutive correct answers since the last miss.
    pub streak: u32,
    pub ease_factor: f64,
    pub interval_days: u32,
    pub last_studied_at: Option<DateTime<Utc>>,
    pub next_due: Option<NaiveDate>,
}

impl WordStatistics {
    /// Fresh statistics for a word's first attempt.
    pub fn new(word_id: i64) -> Self {
        let state = WordState::default();
        Self {
            word_id,
            total_attempts: 0,
            correct_count: 0,
            wrong_count: 0,
            streak: state.streak,
            ease_factor: state.ease_factor,
            interval_days: state.interval_days,
            last_studied_at: None,
            next_due: None,
        }
    }

    /// The slice of state the scheduling algorithm operates on.
    pub fn scheduler_state(&self) -> WordState {
        WordState {
            ease_factor: self.ease_factor,
            interval_days: self.interval_days,
            streak: self.streak,
        }
    }

    /// Wrong-rate percentage, `None` before the first attempt.
    pub fn wrong_rate(&self) -> Option<f64> {
        if self.total_attempts == 0 {
            None
        } else {
            Some(f64::from(self.wrong_count) / f64::from(self.total_attempts) * 100.0)
        }
    }

    pub fn mastery(&self) -> MasteryLevel {
        MasteryLevel::from_wrong_rate(self.wrong_rate())
    }
}

/// Remediation flag for a word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrongNote {
    pub id: i64,
    pub word_id: i64,
    pub added_at: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub review_count: u32,
}

/// Wrong-note entry joined with its word for display.
#[derive(Debug, Clone, Serialize)]
pub struct WrongNoteOverview {
    pub note: WrongNote,
    pub term: String,
    pub translation: String,
    pub total_attempts: u32,
    pub wrong_rate: Option<f64>,
}

/// A scored exam sitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSession {
    pub id: i64,
    pub taken_at: DateTime<Utc>,
    pub exam_type: ExamType,
    pub total_words: u32,
    pub correct_count: u32,
    pub time_taken_secs: u32,
}

/// One question within an exam session, joined with its word.
#[derive(Debug, Clone, Serialize)]
pub struct ExamDetailRow {
    pub id: i64,
    pub exam_id: i64,
    pub word_id: i64,
    pub question_number: u32,
    pub user_answer: String,
    pub is_correct: bool,
    pub term: String,
    pub translation: String,
}

/// A word enriched with its statistics for listings.
#[derive(Debug, Clone, Serialize)]
pub struct WordOverview {
    pub word: Word,
    pub total_attempts: u32,
    pub wrong_rate: Option<f64>,
    pub mastery: MasteryLevel,
    pub last_studied_at: Option<DateTime<Utc>>,
    pub next_due: Option<NaiveDate>,
}
