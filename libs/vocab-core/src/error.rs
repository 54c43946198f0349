//! Error types for vocab-core.

use thiserror::Error;

/// Errors from parsing wire representations of core enums.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown study mode: {0}")]
    UnknownStudyMode(String),

    #[error("unknown exam type: {0}")]
    UnknownExamType(String),
}
