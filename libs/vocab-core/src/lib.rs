//! Core scheduling library for the vocabulary engine.
//!
//! Provides:
//! - SM-2 spaced repetition transition function
//! - Outcome-to-quality grading policy
//! - Mastery classification from accumulated statistics
//! - Shared types (StudyMode, ExamType, WordState)

pub mod algorithm;
pub mod error;
pub mod mastery;
pub mod quality;
pub mod types;

pub use algorithm::{SchedulingResult, SpacedRepetitionAlgorithm};
pub use error::ParseError;
pub use mastery::MasteryLevel;
pub use quality::QualityMapping;
pub use types::{ExamType, StudyMode, WordState};
