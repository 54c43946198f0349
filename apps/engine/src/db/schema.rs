//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for the local SQLite database.
///
/// Cascading deletes are declarative: removing a word takes its attempts,
/// statistics, wrong note, and exam details with it (sibling exam details
/// and the session header survive).
pub const SCHEMA: &str = r#"
-- Vocabulary entries
CREATE TABLE IF NOT EXISTS words (
    word_id INTEGER PRIMARY KEY AUTOINCREMENT,
    term TEXT NOT NULL UNIQUE,
    translation TEXT NOT NULL,
    memo TEXT NOT NULL DEFAULT '',
    is_favorite INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    modified_at TEXT
);

-- Append-only study history (flashcard and exam attempts)
CREATE TABLE IF NOT EXISTS attempt_history (
    attempt_id INTEGER PRIMARY KEY AUTOINCREMENT,
    word_id INTEGER NOT NULL REFERENCES words(word_id) ON DELETE CASCADE,
    studied_at TEXT NOT NULL,
    is_correct INTEGER NOT NULL,
    response_time_ms INTEGER,
    mode TEXT NOT NULL CHECK (mode IN ('flashcard', 'exam'))
);

-- Per-word learning state, mutated only by the scheduler
CREATE TABLE IF NOT EXISTS word_statistics (
    word_id INTEGER PRIMARY KEY REFERENCES words(word_id) ON DELETE CASCADE,
    total_attempts INTEGER NOT NULL DEFAULT 0,
    correct_count INTEGER NOT NULL DEFAULT 0,
    wrong_count INTEGER NOT NULL DEFAULT 0,
    streak INTEGER NOT NULL DEFAULT 0,
    ease_factor REAL NOT NULL DEFAULT 2.5,
    interval_days INTEGER NOT NULL DEFAULT 0,
    last_studied_at TEXT,
    next_due TEXT,
    CHECK (correct_count + wrong_count = total_attempts)
);

-- Words flagged for remediation
CREATE TABLE IF NOT EXISTS wrong_notes (
    note_id INTEGER PRIMARY KEY AUTOINCREMENT,
    word_id INTEGER NOT NULL UNIQUE REFERENCES words(word_id) ON DELETE CASCADE,
    added_at TEXT NOT NULL,
    last_reviewed_at TEXT,
    review_count INTEGER NOT NULL DEFAULT 0
);

-- Exam sittings
CREATE TABLE IF NOT EXISTS exam_sessions (
    exam_id INTEGER PRIMARY KEY AUTOINCREMENT,
    taken_at TEXT NOT NULL,
    exam_type TEXT NOT NULL CHECK (exam_type IN ('short_answer', 'multiple_choice')),
    total_words INTEGER NOT NULL,
    correct_count INTEGER NOT NULL DEFAULT 0,
    time_taken_secs INTEGER NOT NULL DEFAULT 0
);

-- Per-question detail, owned by its session
CREATE TABLE IF NOT EXISTS exam_details (
    detail_id INTEGER PRIMARY KEY AUTOINCREMENT,
    exam_id INTEGER NOT NULL REFERENCES exam_sessions(exam_id) ON DELETE CASCADE,
    word_id INTEGER NOT NULL REFERENCES words(word_id) ON DELETE CASCADE,
    question_number INTEGER NOT NULL,
    user_answer TEXT NOT NULL DEFAULT '',
    is_correct INTEGER NOT NULL
);

-- Key/value settings
CREATE TABLE IF NOT EXISTS user_settings (
    setting_key TEXT PRIMARY KEY,
    setting_value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_attempts_word ON attempt_history(word_id);
CREATE INDEX IF NOT EXISTS idx_attempts_date ON attempt_history(studied_at);
CREATE INDEX IF NOT EXISTS idx_stats_due ON word_statistics(next_due);
CREATE INDEX IF NOT EXISTS idx_details_exam ON exam_details(exam_id);
"#;

/// Seed default settings if absent.
pub const INIT_SETTINGS: &str = r#"
INSERT OR IGNORE INTO user_settings (setting_key, setting_value, updated_at) VALUES
    ('daily_word_goal', '50', datetime('now')),
    ('daily_time_goal_min', '30', datetime('now')),
    ('flashcard_time_limit_secs', '10', datetime('now')),
    ('exam_time_limit_secs', '600', datetime('now')),
    ('theme', 'light', datetime('now'));
"#;
