//! Update hook.
//!
//! Runs a user-supplied executable as `hook <path> <new_count> <old_count>`
//! after a changed count has been recorded. Output is discarded and the exit
//! status is only logged.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, warn};

use crate::snapshot::DocumentSnapshot;

/// Returns the exit status, or None if the hook could not be started.
pub fn run(hook: &Path, snapshot: &DocumentSnapshot) -> Option<ExitStatus> {
    let status = Command::new(hook)
        .arg(&snapshot.path)
        .arg(snapshot.words.to_string())
        .arg(snapshot.previous.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) => {
            debug!(hook = %hook.display(), path = %snapshot.path, %status, "update hook finished");
            Some(status)
        }
        Err(e) => {
            warn!(hook = %hook.display(), path = %snapshot.path, "failed to run update hook: {e}");
            None
        }
    }
}
