//! Schema versioning.
//!
//! The schema version lives in the SQLite header (`PRAGMA user_version`), so
//! it is read and written through the same transaction as the migration
//! statements themselves. Steps are indexed from 0; a store at version `v`
//! has applied steps `0..v`.

use rusqlite::Connection;
use tracing::{info, warn};

use crate::error::StoreError;

/// Ordered migration steps. Append only: never edit or reorder a shipped step.
pub const MIGRATIONS: &[&str] = &[
    "CREATE TABLE config (
        key TEXT PRIMARY KEY,
        value TEXT
    )",
    // path registry, not consulted by any query yet
    "CREATE TABLE documents (
        id INTEGER PRIMARY KEY,
        path TEXT
    )",
    "CREATE TABLE word_count (
        id INTEGER PRIMARY KEY,
        path TEXT NOT NULL,
        words INTEGER NOT NULL,
        timestamp INTEGER NOT NULL,
        UNIQUE (path, timestamp)
    )",
];

/// Read the schema version from the database header.
pub fn current_version(conn: &Connection) -> Result<usize, StoreError> {
    let version: i64 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|source| StoreError::VersionUnavailable { source })?;

    Ok(version.max(0) as usize)
}

/// Apply the built-in migrations. Returns the resulting schema version.
pub fn migrate(conn: &mut Connection) -> Result<usize, StoreError> {
    migrate_with(conn, MIGRATIONS)
}

/// Apply `steps[current_version..]` as one transaction.
///
/// On failure nothing is applied and the stored version is unchanged; the
/// error names the first failing step. Running it again once the store is
/// at `steps.len()` is a no-op.
pub fn migrate_with(conn: &mut Connection, steps: &[&str]) -> Result<usize, StoreError> {
    let current = current_version(conn)?;
    let target = steps.len();

    if current > target {
        warn!(
            current,
            known = target,
            "database schema is newer than this build, leaving it untouched"
        );
        return Ok(current);
    }

    if current == target {
        return Ok(current);
    }

    let tx = conn.transaction()?;

    for (step, sql) in steps.iter().enumerate().skip(current) {
        tx.execute_batch(sql)
            .map_err(|source| StoreError::MigrationFailed { step, source })?;
    }

    tx.pragma_update(None, "user_version", target as i64)?;
    tx.commit()?;

    info!(from = current, to = target, "migrated database schema");
    Ok(target)
}
