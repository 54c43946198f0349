//! Typed access to the key/value settings store.
//!
//! Missing or malformed values fall back to defaults; the store never has
//! to be complete.

use serde::{Deserialize, Serialize};

use crate::db::{queries, Database};
use crate::error::Result;

pub const DAILY_WORD_GOAL: &str = "daily_word_goal";
pub const DAILY_TIME_GOAL_MIN: &str = "daily_time_goal_min";
pub const FLASHCARD_TIME_LIMIT_SECS: &str = "flashcard_time_limit_secs";
pub const EXAM_TIME_LIMIT_SECS: &str = "exam_time_limit_secs";
pub const THEME: &str = "theme";

/// Study-relevant settings, read-only input to the scheduler and queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySettings {
    pub daily_word_goal: u32,
    pub daily_time_goal_min: u32,
    pub flashcard_time_limit_secs: u32,
    pub exam_time_limit_secs: u32,
    pub theme: String,
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            daily_word_goal: 50,
            daily_time_goal_min: 30,
            flashcard_time_limit_secs: 10,
            exam_time_limit_secs: 600,
            theme: "light".to_string(),
        }
    }
}

/// Load the current settings, merging stored values over defaults.
pub fn study_settings(db: &Database) -> Result<StudySettings> {
    let defaults = StudySettings::default();
    db.with_conn(|conn| {
        Ok(StudySettings {
            daily_word_goal: get_u32(conn, DAILY_WORD_GOAL, defaults.daily_word_goal)?,
            daily_time_goal_min: get_u32(conn, DAILY_TIME_GOAL_MIN, defaults.daily_time_goal_min)?,
            flashcard_time_limit_secs: get_u32(
                conn,
                FLASHCARD_TIME_LIMIT_SECS,
                defaults.flashcard_time_limit_secs,
            )?,
            exam_time_limit_secs: get_u32(
                conn,
                EXAM_TIME_LIMIT_SECS,
                defaults.exam_time_limit_secs,
            )?,
            theme: queries::get_setting(conn, THEME)?.unwrap_or(defaults.theme),
        })
    })
}

fn get_u32(conn: &rusqlite::Connection, key: &str, default: u32) -> Result<u32> {
    Ok(queries::get_setting(conn, key)?
        .and_then(|v| v.parse().ok())
        .unwrap_or(default))
}
