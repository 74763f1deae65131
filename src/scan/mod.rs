pub mod paths;
pub mod words;

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::hook;
use crate::snapshot::{self, DocumentSnapshot};
use crate::store::ledger::Ledger;

pub struct ScanResult {
    /// one snapshot per counted document, ordered by ledger path
    pub documents: Vec<DocumentSnapshot>,
    /// documents and roots that were skipped, and why
    pub diagnostics: Vec<String>,
    pub duration_ms: Option<u128>,
}

impl ScanResult {
    pub fn empty() -> Self {
        ScanResult {
            documents: Vec::new(),
            diagnostics: Vec::new(),
            duration_ms: None,
        }
    }
}

/// Count every document under the configured roots, record changed counts
/// and run the update hook for them. A failing document is logged, noted in
/// the diagnostics and left out; the rest are still processed.
pub fn run(config: &Config, ledger: &Ledger) -> ScanResult {
    run_at(config, ledger, Utc::now())
}

/// Same as `run`, recording changed counts at `now`.
pub fn run_at(config: &Config, ledger: &Ledger, now: DateTime<Utc>) -> ScanResult {
    let start = std::time::Instant::now();
    let mut scan_result = ScanResult::empty();
    let mut scan = Scan {
        config,
        ledger,
        now,
        documents: BTreeMap::new(),
    };

    for root in &config.roots {
        let metadata = match std::fs::metadata(root) {
            Ok(m) => m,
            Err(e) => {
                skip(&mut scan_result.diagnostics, root, &e);
                continue;
            }
        };

        if !metadata.is_dir() {
            scan.count_document(root, &mut scan_result.diagnostics);
            continue;
        }

        for entry in WalkDir::new(root).follow_links(false) {
            match entry {
                Ok(entry) if entry.path().is_file() => {
                    scan.count_document(entry.path(), &mut scan_result.diagnostics);
                }
                Ok(_) => {}
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    skip(&mut scan_result.diagnostics, &path, &e);
                }
            }
        }
    }

    scan_result.documents = scan.documents.into_values().collect();
    scan_result.duration_ms = Some(start.elapsed().as_millis());
    scan_result
}

struct Scan<'a> {
    config: &'a Config,
    ledger: &'a Ledger<'a>,
    now: DateTime<Utc>,
    documents: BTreeMap<String, DocumentSnapshot>,
}

impl Scan<'_> {
    fn count_document(&mut self, path: &Path, diagnostics: &mut Vec<String>) {
        let config = self.config;

        if !config.file_filter.admits(&paths::to_slash(path)) {
            return;
        }

        let absolute = match paths::absolute(path) {
            Ok(p) => p,
            Err(e) => return skip(diagnostics, path, &e),
        };

        if paths::is_database_file(&absolute, &config.database) {
            return;
        }

        let key = paths::relative_path(&config.base, &absolute);
        if self.documents.contains_key(&key) {
            return;
        }

        let words = match words::count_words(&absolute, &config.annotation) {
            Ok(n) => n,
            // removed since it was listed, e.g. a transient sqlite journal
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "vanished before counting");
                return;
            }
            Err(e) => return skip(diagnostics, path, &e),
        };

        let snapshot = match snapshot::build_snapshot_at(self.ledger, &key, words, self.now) {
            Ok(s) => s,
            Err(e) => return skip(diagnostics, path, &e),
        };

        debug!(
            path = %key,
            words,
            previous = snapshot.previous,
            yesterday = snapshot.yesterday,
            "counted"
        );

        if snapshot.changed() {
            if let Some(hook_path) = &config.update_hook {
                hook::run(hook_path, &snapshot);
            }
        }

        self.documents.insert(key, snapshot);
    }
}

fn skip(diagnostics: &mut Vec<String>, path: &Path, err: &dyn std::error::Error) {
    warn!(path = %path.display(), "skipping: {err}");
    diagnostics.push(format!("skipping {}: {err}", path.display()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use crate::config::{ConfigFile, FileFilter};
    use crate::store::Store;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;

    struct Fixture {
        dir: tempfile::TempDir,
        store: Store,
        config: Config,
    }

    fn fixture(extra: &[&str]) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("wc.db");
        let docs = dir.path().join("docs");
        fs::create_dir_all(docs.join("chapters")).unwrap();

        let mut argv = vec![
            "quill".to_string(),
            "count".to_string(),
            "-d".to_string(),
            db.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        argv.push(docs.display().to_string());
        let Command::Count(args) = Cli::parse_from(argv).command else {
            unreachable!();
        };

        let config = Config::from_count_args(&args, ConfigFile::default()).unwrap();
        let store = Store::open(&config.database).unwrap();
        Fixture { dir, store, config }
    }

    fn write(fx: &Fixture, rel: &str, text: &str) -> PathBuf {
        let path = fx.dir.path().join(rel);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn counts_documents_recursively_in_path_order() {
        let fx = fixture(&[]);
        write(&fx, "docs/b.txt", "one two three");
        write(&fx, "docs/chapters/a.txt", "one two # note");
        write(&fx, "docs/a.txt", "one");

        let result = run(&fx.config, &fx.store.ledger());

        let summary: Vec<(&str, u64)> = result
            .documents
            .iter()
            .map(|d| (d.path.as_str(), d.words))
            .collect();
        assert_eq!(
            summary,
            vec![("docs/a.txt", 1), ("docs/b.txt", 3), ("docs/chapters/a.txt", 2)]
        );
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn changed_count_is_recorded_on_next_run() {
        let fx = fixture(&[]);
        write(&fx, "docs/a.txt", "one two");

        let now = Utc::now();

        run_at(&fx.config, &fx.store.ledger(), now);
        assert_eq!(fx.store.ledger().entry_count("docs/a.txt").unwrap(), 1);

        write(&fx, "docs/a.txt", "one two three four");
        let later = now + chrono::Duration::seconds(1);
        let result = run_at(&fx.config, &fx.store.ledger(), later);

        assert_eq!(result.documents[0].words, 4);
        assert_eq!(result.documents[0].previous, 0);
        assert_eq!(fx.store.ledger().entry_count("docs/a.txt").unwrap(), 2);
    }

    #[test]
    fn database_inside_root_is_not_counted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("draft.txt"), "a b c").unwrap();
        let db = dir.path().join("wc.db");
        let args = match Cli::parse_from([
            "quill",
            "count",
            "-d",
            db.to_str().unwrap(),
            dir.path().to_str().unwrap(),
        ])
        .command
        {
            Command::Count(args) => args,
            Command::History(_) => unreachable!(),
        };
        let config = Config::from_count_args(&args, ConfigFile::default()).unwrap();
        let store = Store::open(&config.database).unwrap();

        let result = run(&config, &store.ledger());

        let paths: Vec<&str> = result.documents.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["draft.txt"]);
    }

    #[test]
    fn ignore_pattern_skips_matching_files() {
        let fx = fixture(&["--ignore-file-pattern", "\\.tmp$"]);
        write(&fx, "docs/a.txt", "one");
        write(&fx, "docs/a.txt.tmp", "one two");

        let result = run(&fx.config, &fx.store.ledger());

        assert_eq!(result.documents.len(), 1);
        assert_eq!(result.documents[0].path, "docs/a.txt");
    }

    #[test]
    fn accept_pattern_keeps_only_matching_files() {
        let fx = fixture(&["--accept-file-pattern", "\\.md$"]);
        write(&fx, "docs/a.txt", "one");
        write(&fx, "docs/chapters/one.md", "one two");

        let result = run(&fx.config, &fx.store.ledger());

        assert!(matches!(fx.config.file_filter, FileFilter::Accept(_)));
        assert_eq!(result.documents.len(), 1);
        assert_eq!(result.documents[0].path, "docs/chapters/one.md");
    }

    #[test]
    fn missing_root_is_a_diagnostic() {
        let mut fx = fixture(&[]);
        write(&fx, "docs/a.txt", "one");
        fx.config.roots.push(fx.dir.path().join("absent"));

        let result = run(&fx.config, &fx.store.ledger());

        assert_eq!(result.documents.len(), 1);
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].contains("absent"));
    }

    #[test]
    fn same_document_from_two_roots_is_counted_once() {
        let mut fx = fixture(&[]);
        let file = write(&fx, "docs/a.txt", "one two");
        fx.config.roots.push(file);

        let result = run(&fx.config, &fx.store.ledger());

        assert_eq!(result.documents.len(), 1);
        assert!(result.diagnostics.is_empty());
        assert_eq!(fx.store.ledger().entry_count("docs/a.txt").unwrap(), 1);
    }

    #[test]
    fn store_failure_skips_document_and_continues() {
        let fx = fixture(&[]);
        write(&fx, "docs/a.txt", "one two");
        write(&fx, "docs/b.txt", "three");
        let unmigrated = rusqlite::Connection::open_in_memory().unwrap();
        let ledger = Ledger::new(&unmigrated);

        let result = run(&fx.config, &ledger);

        assert!(result.documents.is_empty());
        assert_eq!(result.diagnostics.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_documents_keep_their_own_keys() {
        let fx = fixture(&[]);
        let outside = tempfile::tempdir().unwrap();
        let target = outside.path().join("shared.txt");
        fs::write(&target, "one two three").unwrap();
        std::os::unix::fs::symlink(&target, fx.dir.path().join("docs/one.txt")).unwrap();
        std::os::unix::fs::symlink(&target, fx.dir.path().join("docs/two.txt")).unwrap();

        let result = run(&fx.config, &fx.store.ledger());

        let summary: Vec<(&str, u64)> = result
            .documents
            .iter()
            .map(|d| (d.path.as_str(), d.words))
            .collect();
        assert_eq!(summary, vec![("docs/one.txt", 3), ("docs/two.txt", 3)]);
        assert!(result.diagnostics.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn hook_runs_once_per_recorded_change() {
        use std::os::unix::fs::PermissionsExt;

        let mut fx = fixture(&[]);
        let log = fx.dir.path().join("hook.log");
        let hook = fx.dir.path().join("hook.sh");
        let script = format!("#!/bin/sh\necho \"$1 $2 $3\" >> '{}'\n", log.display());
        fs::write(&hook, script).unwrap();
        fs::set_permissions(&hook, fs::Permissions::from_mode(0o755)).unwrap();
        fx.config.update_hook = Some(hook);
        write(&fx, "docs/a.txt", "one two three");
        let now = Utc::now();

        let first = run_at(&fx.config, &fx.store.ledger(), now);
        assert!(first.diagnostics.is_empty());
        assert_eq!(fs::read_to_string(&log).unwrap(), "docs/a.txt 3 0\n");

        // same second again: the append collides, so no hook call
        let second = run_at(&fx.config, &fx.store.ledger(), now);
        assert_eq!(second.diagnostics.len(), 1);
        assert!(second.diagnostics[0].contains("already recorded"));
        assert_eq!(fs::read_to_string(&log).unwrap(), "docs/a.txt 3 0\n");
    }
}
