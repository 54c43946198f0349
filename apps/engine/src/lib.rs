//! SQLite-backed vocabulary scheduling engine.
//!
//! Stores words, records study attempts (flashcard and exam modes), keeps
//! per-word SM-2 statistics, maintains wrong-note remediation flags, and
//! builds the daily review queue. The [`Engine`] facade wires everything
//! together; the individual services are public for embedders that want
//! finer control.

pub mod clock;
pub mod db;
pub mod engine;
pub mod error;
pub mod exam;
pub mod models;
pub mod queue;
pub mod recorder;
pub mod scheduler;
pub mod settings;
pub mod wrong_note;

pub use clock::{Clock, FixedClock, SystemClock};
pub use db::Database;
pub use engine::Engine;
pub use error::{Error, Result};
pub use exam::{ExamQuestion, ExamSummary, QuestionResult};
pub use models::{
    AttemptRecord, ExamDetailRow, ExamSession, Word, WordOverview, WordStatistics,
    WrongNote, WrongNoteOverview,
};
pub use queue::{QueueEntry, QueueReason};
pub use recorder::SubmitReceipt;
pub use scheduler::{RemediationPolicy, ScheduleOutcome, Scheduler};
pub use settings::StudySettings;
