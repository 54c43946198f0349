//! Shared fixtures for engine integration tests.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use vocab_engine::{Database, Engine, FixedClock, Scheduler};

/// 09:00 UTC on day `n` of the test calendar.
pub fn at(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap() + Duration::days(n)
}

/// The calendar date of day `n`.
#[allow(dead_code)]
pub fn date(n: i64) -> NaiveDate {
    at(n).date_naive()
}

/// Engine over an in-memory store with the clock pinned to day 0.
pub fn engine() -> Engine {
    Engine::new(
        Database::open_in_memory().expect("in-memory database"),
        Scheduler::default(),
        Box::new(FixedClock(at(0))),
    )
}

/// Add a word and return its id.
#[allow(dead_code)]
pub fn seed_word(engine: &Engine, term: &str) -> i64 {
    engine
        .add_word(term, &format!("{term} (translation)"), None)
        .expect("add word")
        .id
}
