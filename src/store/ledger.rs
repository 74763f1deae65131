//! Append-only word count history.
//!
//! One row per observed change, keyed by (path, timestamp). Rows are never
//! updated or deleted.

use chrono::{DateTime, NaiveTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::debug;

use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub path: String,
    pub words: u64,
    pub timestamp: i64,
}

pub struct Ledger<'a> {
    conn: &'a Connection,
}

impl<'a> Ledger<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Ledger { conn }
    }

    /// Record a word count. A second entry for the same path and second is
    /// rejected with `DuplicateEntry`, the first one is kept.
    pub fn append(&self, path: &str, words: u64, timestamp: i64) -> Result<(), StoreError> {
        let result = self.conn.execute(
            "INSERT INTO word_count (path, words, timestamp) VALUES (?1, ?2, ?3)",
            params![path, i64::try_from(words).unwrap_or(i64::MAX), timestamp],
        );

        match result {
            Ok(_) => {
                debug!(path, words, timestamp, "recorded word count");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(StoreError::DuplicateEntry {
                    path: path.to_string(),
                    timestamp,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Word count of the entry before the latest one, 0 with fewer than two
    /// entries. Callers that have already recorded the current observation
    /// get the count that preceded it.
    pub fn previous_count(&self, path: &str) -> Result<u64, StoreError> {
        let words = self
            .conn
            .query_row(
                "SELECT words FROM word_count
                 WHERE path = ?1
                 ORDER BY timestamp DESC, id DESC
                 LIMIT 1 OFFSET 1",
                params![path],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;

        Ok(words.map(|w| w.max(0) as u64).unwrap_or(0))
    }

    /// Latest word count recorded before the start of the current UTC day.
    pub fn previous_day_count(&self, path: &str) -> Result<u64, StoreError> {
        self.previous_day_count_at(path, Utc::now())
    }

    /// Latest word count recorded before the UTC day containing `now`.
    pub fn previous_day_count_at(&self, path: &str, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let words = self
            .conn
            .query_row(
                "SELECT words FROM word_count
                 WHERE path = ?1 AND timestamp < ?2
                 ORDER BY timestamp DESC, id DESC
                 LIMIT 1",
                params![path, start_of_utc_day(now)],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;

        Ok(words.map(|w| w.max(0) as u64).unwrap_or(0))
    }

    /// Full history of one path, oldest first.
    pub fn entries(&self, path: &str) -> Result<Vec<LedgerEntry>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT path, words, timestamp FROM word_count
             WHERE path = ?1
             ORDER BY timestamp ASC, id ASC",
        )?;

        let entries = stmt
            .query_map(params![path], entry_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    pub fn entry_count(&self, path: &str) -> Result<usize, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM word_count WHERE path = ?1",
            params![path],
            |row| row.get(0),
        )?;

        Ok(count.max(0) as usize)
    }
}

fn entry_from_row(row: &rusqlite::Row) -> rusqlite::Result<LedgerEntry> {
    Ok(LedgerEntry {
        path: row.get(0)?,
        words: row.get::<_, i64>(1)?.max(0) as u64,
        timestamp: row.get(2)?,
    })
}

/// Unix timestamp of midnight UTC on the day containing `now`.
pub fn start_of_utc_day(now: DateTime<Utc>) -> i64 {
    now.date_naive().and_time(NaiveTime::MIN).and_utc().timestamp()
}
