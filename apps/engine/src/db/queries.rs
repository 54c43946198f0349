//! Row-level query functions.
//!
//! Every function takes a `&Connection` so it can run standalone or inside
//! a caller-owned transaction (a `Transaction` derefs to `Connection`).

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use vocab_core::types::{ExamType, StudyMode};

use crate::error::Result;
use crate::models::{
    AttemptRecord, ExamDetailRow, ExamSession, Word, WordOverview, WordStatistics, WrongNote,
    WrongNoteOverview,
};

const WORD_COLUMNS: &str =
    "w.word_id, w.term, w.translation, w.memo, w.is_favorite, w.created_at, w.modified_at";

fn ts(idx: usize, value: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn opt_ts(idx: usize, value: Option<String>) -> rusqlite::Result<Option<DateTime<Utc>>> {
    value.map(|s| ts(idx, s)).transpose()
}

fn opt_date(idx: usize, value: Option<String>) -> rusqlite::Result<Option<NaiveDate>> {
    value
        .map(|s| {
            s.parse::<NaiveDate>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

fn row_to_word(row: &Row) -> rusqlite::Result<Word> {
    Ok(Word {
        id: row.get(0)?,
        term: row.get(1)?,
        translation: row.get(2)?,
        memo: row.get(3)?,
        is_favorite: row.get(4)?,
        created_at: ts(5, row.get(5)?)?,
        modified_at: opt_ts(6, row.get(6)?)?,
    })
}

// --- words ------------------------------------------------------------

pub fn insert_word(
    conn: &Connection,
    term: &str,
    translation: &str,
    memo: &str,
    created_at: DateTime<Utc>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO words (term, translation, memo, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![term, translation, memo, created_at.to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_word(conn: &Connection, word_id: i64) -> Result<Option<Word>> {
    conn.query_row(
        &format!("SELECT {WORD_COLUMNS} FROM words w WHERE w.word_id = ?1"),
        params![word_id],
        row_to_word,
    )
    .optional()
    .map_err(Into::into)
}

pub fn find_word_by_term(conn: &Connection, term: &str) -> Result<Option<Word>> {
    conn.query_row(
        &format!("SELECT {WORD_COLUMNS} FROM words w WHERE w.term = ?1"),
        params![term],
        row_to_word,
    )
    .optional()
    .map_err(Into::into)
}

pub fn word_exists(conn: &Connection, word_id: i64) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM words WHERE word_id = ?1",
            params![word_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

pub fn update_word(
    conn: &Connection,
    word_id: i64,
    translation: Option<&str>,
    memo: Option<&str>,
    modified_at: DateTime<Utc>,
) -> Result<usize> {
    let count = conn.execute(
        "UPDATE words SET
            translation = COALESCE(?2, translation),
            memo = COALESCE(?3, memo),
            modified_at = ?4
         WHERE word_id = ?1",
        params![word_id, translation, memo, modified_at.to_rfc3339()],
    )?;
    Ok(count)
}

pub fn set_favorite(
    conn: &Connection,
    word_id: i64,
    is_favorite: bool,
    modified_at: DateTime<Utc>,
) -> Result<usize> {
    let count = conn.execute(
        "UPDATE words SET is_favorite = ?2, modified_at = ?3 WHERE word_id = ?1",
        params![word_id, is_favorite, modified_at.to_rfc3339()],
    )?;
    Ok(count)
}

pub fn delete_word(conn: &Connection, word_id: i64) -> Result<usize> {
    let count = conn.execute("DELETE FROM words WHERE word_id = ?1", params![word_id])?;
    Ok(count)
}

pub fn random_words(conn: &Connection, count: usize) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {WORD_COLUMNS} FROM words w ORDER BY RANDOM() LIMIT ?1"
    ))?;
    let words = stmt
        .query_map(params![count], row_to_word)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(words)
}

// --- word overviews ---------------------------------------------------

fn row_to_overview(row: &Row) -> rusqlite::Result<WordOverview> {
    let word = row_to_word(row)?;
    let total_attempts: u32 = row.get(7)?;
    let wrong_count: u32 = row.get(8)?;
    let wrong_rate = if total_attempts == 0 {
        None
    } else {
        Some(f64::from(wrong_count) / f64::from(total_attempts) * 100.0)
    };
    Ok(WordOverview {
        mastery: vocab_core::MasteryLevel::from_wrong_rate(wrong_rate),
        total_attempts,
        wrong_rate,
        last_studied_at: opt_ts(9, row.get(9)?)?,
        next_due: opt_date(10, row.get(10)?)?,
        word,
    })
}

const OVERVIEW_SELECT: &str = "SELECT w.word_id, w.term, w.translation, w.memo, w.is_favorite,
        w.created_at, w.modified_at,
        COALESCE(ws.total_attempts, 0), COALESCE(ws.wrong_count, 0),
        ws.last_studied_at, ws.next_due
     FROM words w
     LEFT JOIN word_statistics ws ON ws.word_id = w.word_id";

pub fn list_word_overviews(
    conn: &Connection,
    limit: usize,
    offset: usize,
) -> Result<Vec<WordOverview>> {
    let mut stmt = conn.prepare(&format!(
        "{OVERVIEW_SELECT} ORDER BY w.created_at DESC, w.word_id DESC LIMIT ?1 OFFSET ?2"
    ))?;
    let words = stmt
        .query_map(params![limit, offset], row_to_overview)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(words)
}

pub fn search_word_overviews(conn: &Connection, keyword: &str) -> Result<Vec<WordOverview>> {
    let pattern = format!("%{keyword}%");
    let mut stmt = conn.prepare(&format!(
        "{OVERVIEW_SELECT}
         WHERE w.term LIKE ?1 OR w.translation LIKE ?1 OR w.memo LIKE ?1
         ORDER BY w.term ASC, w.word_id ASC"
    ))?;
    let words = stmt
        .query_map(params![pattern], row_to_overview)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(words)
}

pub fn get_word_overview(conn: &Connection, word_id: i64) -> Result<Option<WordOverview>> {
    conn.query_row(
        &format!("{OVERVIEW_SELECT} WHERE w.word_id = ?1"),
        params![word_id],
        row_to_overview,
    )
    .optional()
    .map_err(Into::into)
}

// --- statistics -------------------------------------------------------

pub fn get_statistics(conn: &Connection, word_id: i64) -> Result<Option<WordStatistics>> {
    conn.query_row(
        "SELECT word_id, total_attempts, correct_count, wrong_count, streak,
                ease_factor, interval_days, last_studied_at, next_due
         FROM word_statistics WHERE word_id = ?1",
        params![word_id],
        |row| {
            Ok(WordStatistics {
                word_id: row.get(0)?,
                total_attempts: row.get(1)?,
                correct_count: row.get(2)?,
                wrong_count: row.get(3)?,
                streak: row.get(4)?,
                ease_factor: row.get(5)?,
                interval_days: row.get(6)?,
                last_studied_at: opt_ts(7, row.get(7)?)?,
                next_due: opt_date(8, row.get(8)?)?,
            })
        },
    )
    .optional()
    .map_err(Into::into)
}

pub fn save_statistics(conn: &Connection, stats: &WordStatistics) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO word_statistics
            (word_id, total_attempts, correct_count, wrong_count, streak,
             ease_factor, interval_days, last_studied_at, next_due)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            stats.word_id,
            stats.total_attempts,
            stats.correct_count,
            stats.wrong_count,
            stats.streak,
            stats.ease_factor,
            stats.interval_days,
            stats.last_studied_at.map(|t| t.to_rfc3339()),
            stats.next_due.map(|d| d.to_string()),
        ],
    )?;
    Ok(())
}

// --- attempts ---------------------------------------------------------

pub fn insert_attempt(
    conn: &Connection,
    word_id: i64,
    studied_at: DateTime<Utc>,
    is_correct: bool,
    response_time_ms: Option<i64>,
    mode: StudyMode,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO attempt_history (word_id, studied_at, is_correct, response_time_ms, mode)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            word_id,
            studied_at.to_rfc3339(),
            is_correct,
            response_time_ms,
            mode.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn attempts_for_word(conn: &Connection, word_id: i64) -> Result<Vec<AttemptRecord>> {
    let mut stmt = conn.prepare(
        "SELECT attempt_id, word_id, studied_at, is_correct, response_time_ms, mode
         FROM attempt_history WHERE word_id = ?1
         ORDER BY studied_at ASC, attempt_id ASC",
    )?;
    let attempts = stmt
        .query_map(params![word_id], |row| {
            let mode: String = row.get(5)?;
            Ok(AttemptRecord {
                id: row.get(0)?,
                word_id: row.get(1)?,
                studied_at: ts(2, row.get(2)?)?,
                is_correct: row.get(3)?,
                response_time_ms: row.get(4)?,
                mode: mode.parse().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
                })?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(attempts)
}

// --- wrong notes ------------------------------------------------------

pub fn get_wrong_note(conn: &Connection, word_id: i64) -> Result<Option<WrongNote>> {
    conn.query_row(
        "SELECT note_id, word_id, added_at, last_reviewed_at, review_count
         FROM wrong_notes WHERE word_id = ?1",
        params![word_id],
        |row| {
            Ok(WrongNote {
                id: row.get(0)?,
                word_id: row.get(1)?,
                added_at: ts(2, row.get(2)?)?,
                last_reviewed_at: opt_ts(3, row.get(3)?)?,
                review_count: row.get(4)?,
            })
        },
    )
    .optional()
    .map_err(Into::into)
}

pub fn insert_wrong_note(conn: &Connection, word_id: i64, added_at: DateTime<Utc>) -> Result<i64> {
    conn.execute(
        "INSERT INTO wrong_notes (word_id, added_at, review_count) VALUES (?1, ?2, 0)",
        params![word_id, added_at.to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn touch_wrong_note(
    conn: &Connection,
    word_id: i64,
    reviewed_at: DateTime<Utc>,
) -> Result<usize> {
    let count = conn.execute(
        "UPDATE wrong_notes
         SET review_count = review_count + 1, last_reviewed_at = ?2
         WHERE word_id = ?1",
        params![word_id, reviewed_at.to_rfc3339()],
    )?;
    Ok(count)
}

pub fn delete_wrong_note(conn: &Connection, word_id: i64) -> Result<usize> {
    let count = conn.execute(
        "DELETE FROM wrong_notes WHERE word_id = ?1",
        params![word_id],
    )?;
    Ok(count)
}

pub fn list_wrong_notes(conn: &Connection) -> Result<Vec<WrongNoteOverview>> {
    let mut stmt = conn.prepare(
        "SELECT wn.note_id, wn.word_id, wn.added_at, wn.last_reviewed_at, wn.review_count,
                w.term, w.translation,
                COALESCE(ws.total_attempts, 0), COALESCE(ws.wrong_count, 0)
         FROM wrong_notes wn
         JOIN words w ON w.word_id = wn.word_id
         LEFT JOIN word_statistics ws ON ws.word_id = wn.word_id
         ORDER BY wn.added_at DESC, wn.note_id DESC",
    )?;
    let notes = stmt
        .query_map([], |row| {
            let total_attempts: u32 = row.get(7)?;
            let wrong_count: u32 = row.get(8)?;
            let wrong_rate = if total_attempts == 0 {
                None
            } else {
                Some(f64::from(wrong_count) / f64::from(total_attempts) * 100.0)
            };
            Ok(WrongNoteOverview {
                note: WrongNote {
                    id: row.get(0)?,
                    word_id: row.get(1)?,
                    added_at: ts(2, row.get(2)?)?,
                    last_reviewed_at: opt_ts(3, row.get(3)?)?,
                    review_count: row.get(4)?,
                },
                term: row.get(5)?,
                translation: row.get(6)?,
                total_attempts,
                wrong_rate,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(notes)
}

// --- review queue -----------------------------------------------------

/// Flagged words, most overdue first, review count as tie-break.
pub fn wrong_note_queue(conn: &Connection) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {WORD_COLUMNS}
         FROM wrong_notes wn
         JOIN words w ON w.word_id = wn.word_id
         LEFT JOIN word_statistics ws ON ws.word_id = wn.word_id
         ORDER BY COALESCE(ws.next_due, '0001-01-01') ASC,
                  wn.review_count DESC, w.word_id ASC"
    ))?;
    let words = stmt
        .query_map([], row_to_word)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(words)
}

/// Words without any recorded attempt, oldest first.
pub fn never_studied_queue(conn: &Connection) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {WORD_COLUMNS}
         FROM words w
         LEFT JOIN word_statistics ws ON ws.word_id = w.word_id
         WHERE (ws.word_id IS NULL OR ws.total_attempts = 0)
           AND w.word_id NOT IN (SELECT word_id FROM wrong_notes)
         ORDER BY w.created_at ASC, w.word_id ASC"
    ))?;
    let words = stmt
        .query_map([], row_to_word)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(words)
}

/// Studied words whose review date has arrived, most overdue first.
pub fn due_queue(conn: &Connection, as_of: NaiveDate) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {WORD_COLUMNS}
         FROM words w
         JOIN word_statistics ws ON ws.word_id = w.word_id
         WHERE ws.total_attempts > 0
           AND ws.next_due IS NOT NULL AND ws.next_due <= ?1
           AND w.word_id NOT IN (SELECT word_id FROM wrong_notes)
         ORDER BY ws.next_due ASC, w.word_id ASC"
    ))?;
    let words = stmt
        .query_map(params![as_of.to_string()], row_to_word)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(words)
}

// --- exams ------------------------------------------------------------

pub fn insert_exam_session(
    conn: &Connection,
    taken_at: DateTime<Utc>,
    exam_type: ExamType,
    total_words: u32,
    correct_count: u32,
    time_taken_secs: u32,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO exam_sessions (taken_at, exam_type, total_words, correct_count, time_taken_secs)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            taken_at.to_rfc3339(),
            exam_type.as_str(),
            total_words,
            correct_count,
            time_taken_secs,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_exam_detail(
    conn: &Connection,
    exam_id: i64,
    word_id: i64,
    question_number: u32,
    user_answer: &str,
    is_correct: bool,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO exam_details (exam_id, word_id, question_number, user_answer, is_correct)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![exam_id, word_id, question_number, user_answer, is_correct],
    )?;
    Ok(conn.last_insert_rowid())
}

fn row_to_session(row: &Row) -> rusqlite::Result<ExamSession> {
    let exam_type: String = row.get(2)?;
    Ok(ExamSession {
        id: row.get(0)?,
        taken_at: ts(1, row.get(1)?)?,
        exam_type: exam_type
            .parse()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?,
        total_words: row.get(3)?,
        correct_count: row.get(4)?,
        time_taken_secs: row.get(5)?,
    })
}

pub fn get_exam_session(conn: &Connection, exam_id: i64) -> Result<Option<ExamSession>> {
    conn.query_row(
        "SELECT exam_id, taken_at, exam_type, total_words, correct_count, time_taken_secs
         FROM exam_sessions WHERE exam_id = ?1",
        params![exam_id],
        row_to_session,
    )
    .optional()
    .map_err(Into::into)
}

pub fn list_exam_sessions(conn: &Connection, limit: usize) -> Result<Vec<ExamSession>> {
    let mut stmt = conn.prepare(
        "SELECT exam_id, taken_at, exam_type, total_words, correct_count, time_taken_secs
         FROM exam_sessions ORDER BY taken_at DESC, exam_id DESC LIMIT ?1",
    )?;
    let sessions = stmt
        .query_map(params![limit], row_to_session)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(sessions)
}

pub fn exam_details(conn: &Connection, exam_id: i64) -> Result<Vec<ExamDetailRow>> {
    let mut stmt = conn.prepare(
        "SELECT ed.detail_id, ed.exam_id, ed.word_id, ed.question_number,
                ed.user_answer, ed.is_correct, w.term, w.translation
         FROM exam_details ed
         JOIN words w ON w.word_id = ed.word_id
         WHERE ed.exam_id = ?1
         ORDER BY ed.question_number ASC",
    )?;
    let details = stmt
        .query_map(params![exam_id], |row| {
            Ok(ExamDetailRow {
                id: row.get(0)?,
                exam_id: row.get(1)?,
                word_id: row.get(2)?,
                question_number: row.get(3)?,
                user_answer: row.get(4)?,
                is_correct: row.get(5)?,
                term: row.get(6)?,
                translation: row.get(7)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(details)
}

// --- settings ---------------------------------------------------------

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT setting_value FROM user_settings WHERE setting_key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
    .map_err(Into::into)
}

pub fn set_setting(
    conn: &Connection,
    key: &str,
    value: &str,
    updated_at: DateTime<Utc>,
) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO user_settings (setting_key, setting_value, updated_at)
         VALUES (?1, ?2, ?3)",
        params![key, value, updated_at.to_rfc3339()],
    )?;
    Ok(())
}
