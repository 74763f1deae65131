//! SQLite word count storage.
//!
//! A single database file holds:
//! - config: key/value settings
//! - documents: path registry
//! - word_count: path, words, timestamp, unique on (path, timestamp)
//!
//! The schema version is kept in the SQLite header and advanced by
//! `schema::migrate` on every open.

pub mod ledger;
pub mod schema;

use rusqlite::Connection;
use std::path::Path;

use crate::error::StoreError;
use ledger::Ledger;

/// Database handle. Open once per command, reuse across all operations.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database file and bring its schema up to date.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut store = Store { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Like `open`, but a missing file is an error instead of a new database.
    pub fn open_existing(path: &Path) -> Result<Self, StoreError> {
        if !path.is_file() {
            return Err(StoreError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Self::open(path)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let mut store = Store {
            conn: Connection::open_in_memory()?,
        };
        store.migrate()?;
        Ok(store)
    }

    pub fn current_version(&self) -> Result<usize, StoreError> {
        schema::current_version(&self.conn)
    }

    pub fn migrate(&mut self) -> Result<usize, StoreError> {
        schema::migrate(&mut self.conn)
    }

    pub fn ledger(&self) -> Ledger<'_> {
        Ledger::new(&self.conn)
    }
}
