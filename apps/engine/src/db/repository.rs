//! Collaborator interfaces over the store.
//!
//! The scheduler and its services consume these narrow traits rather than
//! the full `Database` surface.

use chrono::{DateTime, Utc};

use crate::db::{queries, Database};
use crate::error::{Error, Result};
use crate::models::Word;

/// Durable word records. Pure storage; no scheduling logic.
pub trait WordStore {
    fn get(&self, word_id: i64) -> Result<Option<Word>>;
    fn exists(&self, word_id: i64) -> Result<bool>;
    fn create(
        &self,
        term: &str,
        translation: &str,
        memo: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Word>;
    fn update(
        &self,
        word_id: i64,
        translation: Option<&str>,
        memo: Option<&str>,
        modified_at: DateTime<Utc>,
    ) -> Result<()>;
    fn delete(&self, word_id: i64) -> Result<()>;
}

/// Key/value settings store. Read-only to the scheduler.
pub trait SettingsStore {
    fn get_setting(&self, key: &str) -> Result<Option<String>>;
    fn set_setting(&self, key: &str, value: &str, updated_at: DateTime<Utc>) -> Result<()>;
}

impl WordStore for Database {
    fn get(&self, word_id: i64) -> Result<Option<Word>> {
        self.with_conn(|conn| queries::get_word(conn, word_id))
    }

    fn exists(&self, word_id: i64) -> Result<bool> {
        self.with_conn(|conn| queries::word_exists(conn, word_id))
    }

    fn create(
        &self,
        term: &str,
        translation: &str,
        memo: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Word> {
        self.with_conn(|conn| {
            let id = queries::insert_word(conn, term, translation, memo, created_at)?;
            queries::get_word(conn, id)?.ok_or(Error::WordNotFound(id))
        })
    }

    fn update(
        &self,
        word_id: i64,
        translation: Option<&str>,
        memo: Option<&str>,
        modified_at: DateTime<Utc>,
    ) -> Result<()> {
        self.with_conn(|conn| {
            match queries::update_word(conn, word_id, translation, memo, modified_at)? {
                0 => Err(Error::WordNotFound(word_id)),
                _ => Ok(()),
            }
        })
    }

    fn delete(&self, word_id: i64) -> Result<()> {
        self.with_conn(|conn| match queries::delete_word(conn, word_id)? {
            0 => Err(Error::WordNotFound(word_id)),
            _ => Ok(()),
        })
    }
}

impl SettingsStore for Database {
    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| queries::get_setting(conn, key))
    }

    fn set_setting(&self, key: &str, value: &str, updated_at: DateTime<Utc>) -> Result<()> {
        self.with_conn(|conn| queries::set_setting(conn, key, value, updated_at))
    }
}
