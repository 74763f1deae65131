//! Ledger keys for documents.
//!
//! Documents are keyed by their path relative to the database directory so
//! the same file counted from different working directories shares one
//! history.

use std::io;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Absolute form of `path` against the current directory. `.` and `..` are
/// resolved lexically and symlinks are not followed, so a link keeps its
/// own location as its key.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize(path))
    } else {
        Ok(normalize(&std::env::current_dir()?.join(path)))
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // `..` at the root stays at the root
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// `target` relative to `base`, with `/` separators. Both must be absolute.
/// Uses `..` when `target` is outside `base`.
pub fn relative_path(base: &Path, target: &Path) -> String {
    let base: Vec<Component> = base.components().collect();
    let target: Vec<Component> = target.components().collect();

    let common = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::with_capacity(base.len() + target.len() - 2 * common);
    parts.extend((common..base.len()).map(|_| "..".to_string()));
    parts.extend(
        target[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

pub fn to_slash(path: &Path) -> String {
    let s = path.to_string_lossy();
    if MAIN_SEPARATOR == '\\' {
        s.replace('\\', "/")
    } else {
        s.into_owned()
    }
}

/// True for the database file itself and the journal files SQLite keeps next to it.
pub fn is_database_file(candidate: &Path, database: &Path) -> bool {
    if candidate == database {
        return true;
    }

    let (Some(db_name), Some(name)) = (database.file_name(), candidate.file_name()) else {
        return false;
    };
    if candidate.parent() != database.parent() {
        return false;
    }

    let db_name = db_name.to_string_lossy();
    let name = name.to_string_lossy();
    ["-journal", "-wal", "-shm"]
        .iter()
        .any(|suffix| name == format!("{db_name}{suffix}"))
}
