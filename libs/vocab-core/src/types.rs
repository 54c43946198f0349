//! Core types shared by the scheduling engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// How an attempt was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyMode {
    Flashcard,
    Exam,
}

impl StudyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flashcard => "flashcard",
            Self::Exam => "exam",
        }
    }
}

impl FromStr for StudyMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flashcard" => Ok(Self::Flashcard),
            "exam" => Ok(Self::Exam),
            other => Err(ParseError::UnknownStudyMode(other.to_string())),
        }
    }
}

impl fmt::Display for StudyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of exam sitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    ShortAnswer,
    MultipleChoice,
}

impl ExamType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShortAnswer => "short_answer",
            Self::MultipleChoice => "multiple_choice",
        }
    }
}

impl FromStr for ExamType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short_answer" => Ok(Self::ShortAnswer),
            "multiple_choice" => Ok(Self::MultipleChoice),
            other => Err(ParseError::UnknownExamType(other.to_string())),
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduler-visible learning state of a single word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordState {
    pub ease_factor: f64,
    pub interval_days: u32,
    /// Consecutive correct answers since the last miss.
    pub streak: u32,
}

impl Default for WordState {
    fn default() -> Self {
        Self {
            ease_factor: 2.5,
            interval_days: 0,
            streak: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn study_mode_round_trips() {
        assert_eq!("flashcard".parse::<StudyMode>(), Ok(StudyMode::Flashcard));
        assert_eq!("exam".parse::<StudyMode>(), Ok(StudyMode::Exam));
        assert_eq!(StudyMode::Exam.as_str(), "exam");
    }

    #[test]
    fn unknown_study_mode_is_rejected() {
        let err = "cram".parse::<StudyMode>().unwrap_err();
        assert_eq!(err, ParseError::UnknownStudyMode("cram".to_string()));
    }

    #[test]
    fn exam_type_round_trips() {
        assert_eq!(
            "multiple_choice".parse::<ExamType>(),
            Ok(ExamType::MultipleChoice)
        );
        assert_eq!(ExamType::ShortAnswer.as_str(), "short_answer");
        assert!("essay".parse::<ExamType>().is_err());
    }
}
