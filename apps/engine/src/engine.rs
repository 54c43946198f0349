//! Consumer-facing facade wiring every service together.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use vocab_core::types::{ExamType, StudyMode};

use crate::clock::{Clock, SystemClock};
use crate::db::{queries, Database, SettingsStore, WordStore};
use crate::error::{Error, Result};
use crate::exam::{self, ExamQuestion, ExamSummary, QuestionResult};
use crate::models::{
    AttemptRecord, ExamDetailRow, ExamSession, Word, WordOverview, WrongNoteOverview,
};
use crate::queue::{self, QueueEntry};
use crate::recorder::{self, SubmitReceipt};
use crate::scheduler::{ScheduleOutcome, Scheduler};
use crate::settings::{self, StudySettings};
use crate::wrong_note;

const MAX_TERM_LEN: usize = 100;
const MAX_TRANSLATION_LEN: usize = 500;

/// The vocabulary engine: word store, attempt pipeline, review queue,
/// wrong notes, exams, and settings behind one handle.
pub struct Engine {
    db: Database,
    scheduler: Scheduler,
    clock: Box<dyn Clock>,
}

impl Engine {
    /// Open (or create) the database at `path` with default policies and
    /// the system clock.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(
            Database::open(path)?,
            Scheduler::default(),
            Box::new(SystemClock),
        ))
    }

    /// In-memory engine (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(
            Database::open_in_memory()?,
            Scheduler::default(),
            Box::new(SystemClock),
        ))
    }

    /// Assemble an engine from parts; this is the injection seam for a
    /// custom scheduler configuration or a deterministic clock.
    pub fn new(db: Database, scheduler: Scheduler, clock: Box<dyn Clock>) -> Self {
        Self {
            db,
            scheduler,
            clock,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    // --- words ---------------------------------------------------------

    /// Add a word. The term is trimmed and must be unique.
    pub fn add_word(&self, term: &str, translation: &str, memo: Option<&str>) -> Result<Word> {
        let term = term.trim();
        let translation = translation.trim();
        if term.is_empty() {
            return Err(Error::Validation("term must not be empty".into()));
        }
        if translation.is_empty() {
            return Err(Error::Validation("translation must not be empty".into()));
        }
        if term.chars().count() > MAX_TERM_LEN {
            return Err(Error::Validation(format!(
                "term longer than {MAX_TERM_LEN} characters"
            )));
        }
        if translation.chars().count() > MAX_TRANSLATION_LEN {
            return Err(Error::Validation(format!(
                "translation longer than {MAX_TRANSLATION_LEN} characters"
            )));
        }
        if self
            .db
            .with_conn(|conn| queries::find_word_by_term(conn, term))?
            .is_some()
        {
            return Err(Error::Integrity(format!("word already exists: {term}")));
        }

        let word = self.db.create(
            term,
            translation,
            memo.map(str::trim).unwrap_or(""),
            self.clock.now(),
        )?;
        tracing::info!("word added: {} (id {})", word.term, word.id);
        Ok(word)
    }

    /// Update translation and/or memo. The term is identity and immutable.
    pub fn update_word(
        &self,
        word_id: i64,
        translation: Option<&str>,
        memo: Option<&str>,
    ) -> Result<()> {
        if let Some(t) = translation {
            if t.trim().is_empty() {
                return Err(Error::Validation("translation must not be empty".into()));
            }
        }
        self.db.update(
            word_id,
            translation.map(str::trim),
            memo.map(str::trim),
            self.clock.now(),
        )
    }

    /// Delete a word; attempts, statistics, wrong note, and exam details
    /// cascade with it.
    pub fn delete_word(&self, word_id: i64) -> Result<()> {
        self.db.delete(word_id)?;
        tracing::info!("word deleted: id {}", word_id);
        Ok(())
    }

    pub fn get_word(&self, word_id: i64) -> Result<Word> {
        self.db.get(word_id)?.ok_or(Error::WordNotFound(word_id))
    }

    pub fn word_overview(&self, word_id: i64) -> Result<WordOverview> {
        self.db
            .with_conn(|conn| queries::get_word_overview(conn, word_id))?
            .ok_or(Error::WordNotFound(word_id))
    }

    /// Newest first, with statistics attached.
    pub fn list_words(&self, limit: usize, offset: usize) -> Result<Vec<WordOverview>> {
        self.db
            .with_conn(|conn| queries::list_word_overviews(conn, limit, offset))
    }

    /// Keyword search over term, translation and memo.
    pub fn search_words(&self, keyword: &str) -> Result<Vec<WordOverview>> {
        self.db
            .with_conn(|conn| queries::search_word_overviews(conn, keyword))
    }

    /// Flip the favorite flag; returns the new state.
    pub fn toggle_favorite(&self, word_id: i64) -> Result<bool> {
        let word = self.get_word(word_id)?;
        let flag = !word.is_favorite;
        let now = self.clock.now();
        self.db.with_conn(|conn| {
            queries::set_favorite(conn, word_id, flag, now)?;
            Ok(())
        })?;
        Ok(flag)
    }

    // --- attempts ------------------------------------------------------

    /// Record one study attempt. `mode` must be `"flashcard"` or `"exam"`.
    pub fn submit_attempt(
        &self,
        word_id: i64,
        mode: &str,
        is_correct: bool,
        response_time_ms: Option<i64>,
        recorded_at: DateTime<Utc>,
    ) -> Result<SubmitReceipt> {
        let mode: StudyMode = mode
            .parse()
            .map_err(|e: vocab_core::ParseError| Error::Validation(e.to_string()))?;
        recorder::submit(
            &self.db,
            &self.scheduler,
            word_id,
            mode,
            is_correct,
            response_time_ms,
            recorded_at,
        )
    }

    /// [`Engine::submit_attempt`] stamped with the injected clock.
    pub fn submit_attempt_now(
        &self,
        word_id: i64,
        mode: &str,
        is_correct: bool,
        response_time_ms: Option<i64>,
    ) -> Result<SubmitReceipt> {
        self.submit_attempt(word_id, mode, is_correct, response_time_ms, self.clock.now())
    }

    /// Run the scheduler directly, without an attempt-history row.
    pub fn record_outcome(
        &self,
        word_id: i64,
        is_correct: bool,
        response_time_ms: Option<i64>,
        studied_at: DateTime<Utc>,
    ) -> Result<ScheduleOutcome> {
        self.scheduler
            .record_outcome(&self.db, word_id, is_correct, response_time_ms, studied_at)
    }

    pub fn attempt_history(&self, word_id: i64) -> Result<Vec<AttemptRecord>> {
        self.db
            .with_conn(|conn| queries::attempts_for_word(conn, word_id))
    }

    // --- review queue --------------------------------------------------

    pub fn build_queue(&self, as_of: NaiveDate, limit: Option<usize>) -> Result<Vec<QueueEntry>> {
        queue::build_queue(&self.db, as_of, limit)
    }

    /// Today's queue per the injected clock.
    pub fn todays_queue(&self, limit: Option<usize>) -> Result<Vec<QueueEntry>> {
        self.build_queue(self.clock.today(), limit)
    }

    // --- wrong notes ---------------------------------------------------

    pub fn wrong_notes(&self) -> Result<Vec<WrongNoteOverview>> {
        wrong_note::list(&self.db)
    }

    pub fn is_flagged(&self, word_id: i64) -> Result<bool> {
        self.db.with_conn(|conn| wrong_note::is_flagged(conn, word_id))
    }

    // --- exams ---------------------------------------------------------

    /// Persist a finished sitting; `exam_type` must be `"short_answer"`
    /// or `"multiple_choice"`.
    pub fn record_exam(
        &self,
        exam_type: &str,
        results: &[QuestionResult],
        time_taken_secs: u32,
        taken_at: DateTime<Utc>,
    ) -> Result<ExamSummary> {
        let exam_type: ExamType = exam_type
            .parse()
            .map_err(|e: vocab_core::ParseError| Error::Validation(e.to_string()))?;
        exam::record_session(
            &self.db,
            &self.scheduler,
            exam_type,
            results,
            time_taken_secs,
            taken_at,
        )
    }

    pub fn exam_session(&self, exam_id: i64) -> Result<ExamSession> {
        exam::session(&self.db, exam_id)
    }

    pub fn exam_history(&self, limit: usize) -> Result<Vec<ExamSession>> {
        exam::history(&self.db, limit)
    }

    pub fn exam_details(&self, exam_id: i64) -> Result<Vec<ExamDetailRow>> {
        exam::details(&self.db, exam_id)
    }

    /// Draw random words and build questions for a new sitting.
    pub fn generate_exam(&self, exam_type: ExamType, count: usize) -> Result<Vec<ExamQuestion>> {
        exam::generate_session(&self.db, exam_type, count)
    }

    // --- settings ------------------------------------------------------

    pub fn settings(&self) -> Result<StudySettings> {
        settings::study_settings(&self.db)
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.db.get_setting(key)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.db.set_setting(key, value, self.clock.now())
    }
}
