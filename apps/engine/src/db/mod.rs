//! Local SQLite database operations.

pub mod queries;
pub mod repository;
pub mod schema;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

pub use repository::{SettingsStore, WordStore};

/// Handle to the engine's SQLite store.
///
/// The connection mutex serializes all access; [`Database::with_tx`] wraps
/// a closure in an IMMEDIATE transaction so multi-row updates are atomic
/// and readers never observe partial writes.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open the database at `path`, creating it if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(schema::SCHEMA)?;
        conn.execute_batch(schema::INIT_SETTINGS)?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            [schema::SCHEMA_VERSION],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run reads or a single-statement write on the shared connection.
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.lock()?;
        f(&conn)
    }

    /// Run a closure inside an IMMEDIATE transaction.
    ///
    /// Commits on `Ok`; any error rolls the whole unit back.
    pub fn with_tx<T>(&self, f: impl FnOnce(&Transaction) -> Result<T>) -> Result<T> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Concurrency("database connection lock poisoned".into()))
    }
}
