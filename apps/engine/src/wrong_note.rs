//! Wrong-note lifecycle.
//!
//! Sole owner of the remediation flags. The scheduler drives `upsert` and
//! `clear` from attempt outcomes; nothing else mutates the table.

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::db::{queries, Database};
use crate::error::Result;
use crate::models::WrongNoteOverview;

/// Whether a word is currently flagged for remediation.
pub fn is_flagged(conn: &Connection, word_id: i64) -> Result<bool> {
    Ok(queries::get_wrong_note(conn, word_id)?.is_some())
}

/// Ensure a wrong note exists: create it, or bump the review count and
/// last-review date of an existing one.
pub fn upsert(conn: &Connection, word_id: i64, at: DateTime<Utc>) -> Result<()> {
    if queries::touch_wrong_note(conn, word_id, at)? == 0 {
        queries::insert_wrong_note(conn, word_id, at)?;
        tracing::debug!("wrong note added: word={}", word_id);
    }
    Ok(())
}

/// Remove a word's wrong note. Clearing an unflagged word is a no-op.
pub fn clear(conn: &Connection, word_id: i64) -> Result<()> {
    if queries::delete_wrong_note(conn, word_id)? > 0 {
        tracing::debug!("wrong note cleared: word={}", word_id);
    }
    Ok(())
}

/// All flagged words with their statistics, newest first.
pub fn list(db: &Database) -> Result<Vec<WrongNoteOverview>> {
    db.with_conn(queries::list_wrong_notes)
}
