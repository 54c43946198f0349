//! Attempt recording: one immutable history row per study event.
//!
//! The scheduler runs synchronously in the same transaction, so statistics
//! are always consistent with recorded history. An attempt is either fully
//! applied (record, statistics, wrong-note update) or not applied at all.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;
use vocab_core::StudyMode;

use crate::db::{queries, Database};
use crate::error::{Error, Result};
use crate::models::WordStatistics;
use crate::scheduler::Scheduler;

/// What the caller gets back after a submitted attempt.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitReceipt {
    pub attempt_id: i64,
    pub statistics: WordStatistics,
    /// Whether the word sits in the wrong-note set after this attempt.
    pub flagged: bool,
}

/// Validate and persist one attempt, then schedule the word.
pub fn submit(
    db: &Database,
    scheduler: &Scheduler,
    word_id: i64,
    mode: StudyMode,
    is_correct: bool,
    response_time_ms: Option<i64>,
    recorded_at: DateTime<Utc>,
) -> Result<SubmitReceipt> {
    db.with_tx(|tx| {
        submit_in(
            tx,
            scheduler,
            word_id,
            mode,
            is_correct,
            response_time_ms,
            recorded_at,
        )
    })
}

/// Transaction-scoped body, shared with the exam aggregator.
pub(crate) fn submit_in(
    conn: &Connection,
    scheduler: &Scheduler,
    word_id: i64,
    mode: StudyMode,
    is_correct: bool,
    response_time_ms: Option<i64>,
    recorded_at: DateTime<Utc>,
) -> Result<SubmitReceipt> {
    if let Some(ms) = response_time_ms {
        if ms < 0 {
            return Err(Error::Validation(format!("negative response time: {ms}ms")));
        }
    }

    // Scheduler first: it owns the word/date validation, and a failed
    // transition must not leave an orphan history row.
    let outcome =
        scheduler.record_outcome_in(conn, word_id, is_correct, response_time_ms, recorded_at)?;
    let attempt_id =
        queries::insert_attempt(conn, word_id, recorded_at, is_correct, response_time_ms, mode)?;

    tracing::debug!(
        "attempt recorded: id={} word={} mode={} correct={}",
        attempt_id,
        word_id,
        mode,
        is_correct
    );

    Ok(SubmitReceipt {
        attempt_id,
        statistics: outcome.statistics,
        flagged: outcome.flagged,
    })
}
