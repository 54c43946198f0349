//! Error handling for the engine.

use thiserror::Error;

/// Engine error taxonomy.
///
/// Every failure is surfaced to the caller; the engine never retries.
/// Retrying `submit`/`record_outcome` would double-count an attempt, so a
/// caller must not retry blindly either.
#[derive(Debug, Error)]
pub enum Error {
    #[error("word not found: {0}")]
    WordNotFound(i64),

    #[error("exam not found: {0}")]
    ExamNotFound(i64),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("integrity error: {0}")]
    Integrity(String),

    #[error("concurrency error: {0}")]
    Concurrency(String),

    #[error("sqlite error: {0}")]
    Sqlite(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, msg)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Integrity(msg.clone().unwrap_or_else(|| err.to_string()))
            }
            _ => Self::Sqlite(err),
        }
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_word_not_found() {
        let error = Error::WordNotFound(42);
        assert_eq!(error.to_string(), "word not found: 42");
    }

    #[test]
    fn test_display_validation() {
        let error = Error::Validation("negative response time".to_string());
        assert_eq!(error.to_string(), "validation error: negative response time");
    }

    #[test]
    fn test_display_integrity() {
        let error = Error::Integrity("duplicate term".to_string());
        assert_eq!(error.to_string(), "integrity error: duplicate term");
    }

    #[test]
    fn test_constraint_violation_maps_to_integrity() {
        let sqlite = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT),
            Some("UNIQUE constraint failed: words.term".to_string()),
        );
        let error: Error = sqlite.into();
        assert!(matches!(error, Error::Integrity(_)));
    }

    #[test]
    fn test_other_sqlite_errors_pass_through() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(error, Error::Sqlite(_)));
    }
}
