//! SM-2 scheduling service: turns graded attempts into statistics updates.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;
use vocab_core::algorithm::sm2::Sm2;
use vocab_core::{QualityMapping, SpacedRepetitionAlgorithm};

use crate::db::{queries, Database};
use crate::error::{Error, Result};
use crate::models::WordStatistics;
use crate::wrong_note;

/// Thresholds driving the wrong-note lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemediationPolicy {
    /// Ease below this marks a word weak even on a correct answer.
    pub weak_ease: f64,
    /// Ease required before a flagged word can be considered mastered.
    pub mastered_ease: f64,
    /// Consecutive correct answers required to clear a wrong note.
    pub mastered_streak: u32,
}

impl Default for RemediationPolicy {
    fn default() -> Self {
        Self {
            weak_ease: 2.0,
            mastered_ease: 2.3,
            mastered_streak: 3,
        }
    }
}

/// Statistics state returned to the caller after an attempt is applied.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleOutcome {
    pub statistics: WordStatistics,
    /// Whether the word sits in the wrong-note set after this attempt.
    pub flagged: bool,
}

/// The scheduling state machine: one call per completed attempt.
pub struct Scheduler {
    algorithm: Box<dyn SpacedRepetitionAlgorithm>,
    quality: QualityMapping,
    policy: RemediationPolicy,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            algorithm: Box::new(Sm2::default()),
            quality: QualityMapping::default(),
            policy: RemediationPolicy::default(),
        }
    }
}

impl Scheduler {
    pub fn new(quality: QualityMapping, policy: RemediationPolicy) -> Self {
        Self {
            algorithm: Box::new(Sm2::default()),
            quality,
            policy,
        }
    }

    pub fn with_algorithm(mut self, algorithm: Box<dyn SpacedRepetitionAlgorithm>) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn policy(&self) -> &RemediationPolicy {
        &self.policy
    }

    /// Apply one attempt outcome as a single transaction.
    ///
    /// Updates counters and SM-2 state, recomputes the due date, and drives
    /// the wrong-note lifecycle. Any persistence failure rolls the whole
    /// transition back and is surfaced, never retried.
    pub fn record_outcome(
        &self,
        db: &Database,
        word_id: i64,
        is_correct: bool,
        response_time_ms: Option<i64>,
        studied_at: DateTime<Utc>,
    ) -> Result<ScheduleOutcome> {
        db.with_tx(|tx| self.record_outcome_in(tx, word_id, is_correct, response_time_ms, studied_at))
    }

    /// Same transition over a caller-owned connection, so the attempt
    /// recorder and exam aggregator can fold it into their transactions.
    pub(crate) fn record_outcome_in(
        &self,
        conn: &Connection,
        word_id: i64,
        is_correct: bool,
        response_time_ms: Option<i64>,
        studied_at: DateTime<Utc>,
    ) -> Result<ScheduleOutcome> {
        if let Some(ms) = response_time_ms {
            if ms < 0 {
                return Err(Error::Validation(format!("negative response time: {ms}ms")));
            }
        }

        let word = queries::get_word(conn, word_id)?.ok_or(Error::WordNotFound(word_id))?;
        if studied_at < word.created_at {
            return Err(Error::Validation(format!(
                "study date {studied_at} precedes creation of word {word_id}"
            )));
        }

        let mut stats =
            queries::get_statistics(conn, word_id)?.unwrap_or_else(|| WordStatistics::new(word_id));

        stats.total_attempts += 1;
        if is_correct {
            stats.correct_count += 1;
        } else {
            stats.wrong_count += 1;
        }

        let quality = self.quality.map(is_correct, response_time_ms);
        let result =
            self.algorithm
                .schedule(&stats.scheduler_state(), quality, studied_at.date_naive());

        stats.ease_factor = result.new_state.ease_factor;
        stats.interval_days = result.new_state.interval_days;
        stats.streak = result.new_state.streak;
        stats.last_studied_at = Some(studied_at);
        stats.next_due = Some(result.next_due);

        queries::save_statistics(conn, &stats)?;
        let flagged = self.apply_remediation(conn, &stats, is_correct, studied_at)?;

        tracing::debug!(
            "outcome applied: word={} quality={} ease={:.2} interval={}d due={}",
            word_id,
            quality,
            stats.ease_factor,
            stats.interval_days,
            result.next_due
        );

        Ok(ScheduleOutcome {
            statistics: stats,
            flagged,
        })
    }

    fn apply_remediation(
        &self,
        conn: &Connection,
        stats: &WordStatistics,
        is_correct: bool,
        at: DateTime<Utc>,
    ) -> Result<bool> {
        if !is_correct || stats.ease_factor < self.policy.weak_ease {
            wrong_note::upsert(conn, stats.word_id, at)?;
            return Ok(true);
        }
        if stats.streak >= self.policy.mastered_streak
            && stats.ease_factor >= self.policy.mastered_ease
        {
            wrong_note::clear(conn, stats.word_id)?;
            return Ok(false);
        }
        wrong_note::is_flagged(conn, stats.word_id)
    }
}
