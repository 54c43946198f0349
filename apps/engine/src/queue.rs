//! Review queue construction.

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::{queries, Database};
use crate::error::Result;
use crate::models::Word;
use crate::settings;

/// Why a word landed in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueReason {
    WrongNote,
    New,
    Due,
}

/// One entry of the day's study set.
#[derive(Debug, Clone, Serialize)]
pub struct QueueEntry {
    pub word: Word,
    pub reason: QueueReason,
}

/// Build the ordered study set for `as_of`.
///
/// Wrong-note words always lead (regardless of their computed due date),
/// then never-studied words by creation date, then interval-due words by
/// overdue amount. Output is deterministic for identical store state.
/// A `limit` of 0 yields an empty queue; `None` falls back to the
/// `daily_word_goal` setting.
pub fn build_queue(
    db: &Database,
    as_of: NaiveDate,
    limit: Option<usize>,
) -> Result<Vec<QueueEntry>> {
    let limit = match limit {
        Some(n) => n,
        None => settings::study_settings(db)?.daily_word_goal as usize,
    };
    if limit == 0 {
        return Ok(Vec::new());
    }

    // One lock scope, so the three selects see a consistent snapshot.
    let mut entries = db.with_conn(|conn| {
        let mut entries = Vec::new();
        for word in queries::wrong_note_queue(conn)? {
            entries.push(QueueEntry {
                word,
                reason: QueueReason::WrongNote,
            });
        }
        for word in queries::never_studied_queue(conn)? {
            entries.push(QueueEntry {
                word,
                reason: QueueReason::New,
            });
        }
        for word in queries::due_queue(conn, as_of)? {
            entries.push(QueueEntry {
                word,
                reason: QueueReason::Due,
            });
        }
        Ok(entries)
    })?;

    entries.truncate(limit);
    tracing::debug!("queue built: {} entries as of {}", entries.len(), as_of);
    Ok(entries)
}
