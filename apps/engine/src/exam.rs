//! Exam aggregation: one scored session per sitting.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use vocab_core::types::{ExamType, StudyMode};

use crate::db::{queries, Database};
use crate::error::{Error, Result};
use crate::models::{ExamDetailRow, ExamSession, Word};
use crate::recorder;
use crate::scheduler::Scheduler;

/// One answered question of a sitting, in presentation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    pub word_id: i64,
    pub user_answer: String,
    pub is_correct: bool,
    #[serde(default)]
    pub response_time_ms: Option<i64>,
}

/// Scored summary of a persisted session.
#[derive(Debug, Clone, Serialize)]
pub struct ExamSummary {
    pub exam_id: i64,
    pub total: u32,
    pub correct: u32,
    pub wrong: u32,
    pub score: f64,
    pub time_taken_secs: u32,
    pub wrong_word_ids: Vec<i64>,
}

/// A generated question for a new sitting.
#[derive(Debug, Clone, Serialize)]
pub struct ExamQuestion {
    pub word_id: i64,
    pub question_number: u32,
    /// The cue shown to the user (the word's translation).
    pub prompt: String,
    pub correct_answer: String,
    /// Present only for multiple choice; contains the correct answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

/// Persist a finished sitting and replay every answer through the attempt
/// recorder so exam and flashcard statistics stay unified.
///
/// All-or-nothing: an unknown word anywhere in the batch fails the whole
/// session with zero rows persisted.
pub fn record_session(
    db: &Database,
    scheduler: &Scheduler,
    exam_type: ExamType,
    results: &[QuestionResult],
    time_taken_secs: u32,
    taken_at: DateTime<Utc>,
) -> Result<ExamSummary> {
    if results.is_empty() {
        return Err(Error::Validation(
            "exam must contain at least one question".into(),
        ));
    }

    db.with_tx(|tx| {
        for result in results {
            if !queries::word_exists(tx, result.word_id)? {
                return Err(Error::WordNotFound(result.word_id));
            }
        }

        let total = results.len() as u32;
        let correct = results.iter().filter(|r| r.is_correct).count() as u32;
        let exam_id =
            queries::insert_exam_session(tx, taken_at, exam_type, total, correct, time_taken_secs)?;

        for (idx, result) in results.iter().enumerate() {
            queries::insert_exam_detail(
                tx,
                exam_id,
                result.word_id,
                idx as u32 + 1,
                &result.user_answer,
                result.is_correct,
            )?;
        }
        for result in results {
            recorder::submit_in(
                tx,
                scheduler,
                result.word_id,
                StudyMode::Exam,
                result.is_correct,
                result.response_time_ms,
                taken_at,
            )?;
        }

        let score = f64::from(correct) / f64::from(total) * 100.0;
        let wrong_word_ids = results
            .iter()
            .filter(|r| !r.is_correct)
            .map(|r| r.word_id)
            .collect();

        tracing::info!(
            "exam recorded: id={} type={} score={:.1}% ({} of {})",
            exam_id,
            exam_type,
            score,
            correct,
            total
        );

        Ok(ExamSummary {
            exam_id,
            total,
            correct,
            wrong: total - correct,
            score,
            time_taken_secs,
            wrong_word_ids,
        })
    })
}

/// Look up a session header.
pub fn session(db: &Database, exam_id: i64) -> Result<ExamSession> {
    db.with_conn(|conn| queries::get_exam_session(conn, exam_id))?
        .ok_or(Error::ExamNotFound(exam_id))
}

/// Recent sessions, newest first.
pub fn history(db: &Database, limit: usize) -> Result<Vec<ExamSession>> {
    db.with_conn(|conn| queries::list_exam_sessions(conn, limit))
}

/// Per-question detail of a session, joined with the surviving words.
pub fn details(db: &Database, exam_id: i64) -> Result<Vec<ExamDetailRow>> {
    db.with_conn(|conn| {
        if queries::get_exam_session(conn, exam_id)?.is_none() {
            return Err(Error::ExamNotFound(exam_id));
        }
        queries::exam_details(conn, exam_id)
    })
}

/// Draw `count` random words and build questions for a new sitting.
pub fn generate_session(
    db: &Database,
    exam_type: ExamType,
    count: usize,
) -> Result<Vec<ExamQuestion>> {
    let words = db.with_conn(|conn| queries::random_words(conn, count))?;
    if words.is_empty() {
        return Err(Error::Validation("no words available for an exam".into()));
    }
    Ok(generate_questions(&words, exam_type))
}

/// Build questions from a word pool. Multiple choice draws up to three
/// distractors from the same pool and shuffles the options.
pub fn generate_questions(words: &[Word], exam_type: ExamType) -> Vec<ExamQuestion> {
    let mut rng = rand::thread_rng();
    words
        .iter()
        .enumerate()
        .map(|(idx, word)| {
            let choices = match exam_type {
                ExamType::ShortAnswer => None,
                ExamType::MultipleChoice => Some(generate_choices(word, words, &mut rng)),
            };
            ExamQuestion {
                word_id: word.id,
                question_number: idx as u32 + 1,
                prompt: word.translation.clone(),
                correct_answer: word.term.clone(),
                choices,
            }
        })
        .collect()
}

fn generate_choices(correct: &Word, pool: &[Word], rng: &mut impl Rng) -> Vec<String> {
    let mut others: Vec<&Word> = pool.iter().filter(|w| w.id != correct.id).collect();
    others.shuffle(rng);
    let mut choices: Vec<String> = others.iter().take(3).map(|w| w.term.clone()).collect();
    choices.push(correct.term.clone());
    choices.shuffle(rng);
    choices
}
