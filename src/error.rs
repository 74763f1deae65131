//! Error types for quill.
//!
//! Store errors split into schema-level failures, which abort the run before
//! any counting starts, and per-document failures, which only drop that
//! document from the report.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no database at {path}")]
    NotFound { path: PathBuf },

    #[error("failed to open database {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("schema version unavailable (is the file a valid database?)")]
    VersionUnavailable {
        #[source]
        source: rusqlite::Error,
    },

    #[error("migration step {step} failed, schema left unchanged")]
    MigrationFailed {
        step: usize,
        #[source]
        source: rusqlite::Error,
    },

    #[error("word count for {path} at {timestamp} already recorded")]
    DuplicateEntry { path: String, timestamp: i64 },

    #[error("database error")]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    /// Errors that leave the store in an unknown or unmigrated state.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound { .. }
                | StoreError::Open { .. }
                | StoreError::VersionUnavailable { .. }
                | StoreError::MigrationFailed { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("bad {name}: '{pattern}'")]
    Pattern {
        name: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("accept-file-pattern and ignore-file-pattern cannot be used together")]
    ConflictingFilters,

    #[error("bad database path: {path}")]
    DatabasePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
