//! Per-document word count snapshots.
//!
//! A snapshot combines the current count with what the ledger knew before
//! this observation. Building one records the current count, but only when
//! it differs from the previous count, so repeated runs over an unchanged
//! document do not grow the ledger.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::StoreError;
use crate::store::ledger::Ledger;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSnapshot {
    pub path: String,
    pub words: u64,
    pub previous: u64,
    pub yesterday: u64,
}

impl DocumentSnapshot {
    /// Words written since the start of the current UTC day.
    pub fn today(&self) -> i64 {
        i64::try_from(self.words)
            .unwrap_or(i64::MAX)
            .saturating_sub(i64::try_from(self.yesterday).unwrap_or(i64::MAX))
    }

    /// True when building this snapshot appended a ledger entry.
    pub fn changed(&self) -> bool {
        self.words != self.previous
    }
}

pub fn build_snapshot(
    ledger: &Ledger,
    path: &str,
    current_words: u64,
) -> Result<DocumentSnapshot, StoreError> {
    build_snapshot_at(ledger, path, current_words, Utc::now())
}

/// Build a snapshot as of `now`, appending `(path, current_words, now)` when
/// the count changed. The returned values are the ones read before the append.
pub fn build_snapshot_at(
    ledger: &Ledger,
    path: &str,
    current_words: u64,
    now: DateTime<Utc>,
) -> Result<DocumentSnapshot, StoreError> {
    let previous = ledger.previous_count(path)?;
    let yesterday = ledger.previous_day_count_at(path, now)?;

    let snapshot = DocumentSnapshot {
        path: path.to_string(),
        words: current_words,
        previous,
        yesterday,
    };

    if snapshot.changed() {
        ledger.append(path, current_words, now.timestamp())?;
    }

    Ok(snapshot)
}
