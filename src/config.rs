//! Runtime configuration.
//!
//! Settings come from three layers, highest priority first: command line
//! flags, the optional TOML config file, built-in defaults. The result is a
//! plain `Config` value handed to the scanner and the reporter.

use regex::Regex;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};

use crate::cli::CountArgs;
use crate::error::ConfigError;
use crate::scan::paths;

pub const DEFAULT_DATABASE: &str = "./wc.db";
pub const DEFAULT_ANNOTATION_PATTERN: &str = "#.*$";
pub const DEFAULT_HEADER_FORMAT: &str = "Total: #{total} Today: #{today}#{goal}";
pub const DEFAULT_ITEM_FORMAT: &str = "#{path}: #{total} (#{today})";
pub const DEFAULT_GOAL_FORMAT: &str = " Goal: #{target}(#{remaining})";

/// Contents of config.toml. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub database: Option<PathBuf>,
    pub goal: Option<u64>,
    pub annotation_pattern: Option<String>,
    pub accept_file_pattern: Option<String>,
    pub ignore_file_pattern: Option<String>,
    pub update_hook: Option<PathBuf>,
    pub format_header: Option<String>,
    pub format_item: Option<String>,
    pub format_goal: Option<String>,
}

impl ConfigFile {
    /// Load `explicit` if given, otherwise the default location if it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::read(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::read(&path),
                _ => Ok(ConfigFile::default()),
            },
        }
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// ~/.config/quill/config.toml or platform equivalent
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "quill")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Which walked files get counted. Patterns match the path with `/` separators.
#[derive(Debug, Clone)]
pub enum FileFilter {
    All,
    Accept(Regex),
    Ignore(Regex),
}

impl FileFilter {
    pub fn admits(&self, path: &str) -> bool {
        match self {
            FileFilter::All => true,
            FileFilter::Accept(pattern) => pattern.is_match(path),
            FileFilter::Ignore(pattern) => !pattern.is_match(path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Formats {
    pub header: String,
    pub item: String,
    pub goal: String,
}

impl Default for Formats {
    fn default() -> Self {
        Formats {
            header: DEFAULT_HEADER_FORMAT.to_string(),
            item: DEFAULT_ITEM_FORMAT.to_string(),
            goal: DEFAULT_GOAL_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub roots: Vec<PathBuf>,
    /// absolute path of the database file
    pub database: PathBuf,
    /// directory ledger paths are relative to
    pub base: PathBuf,
    pub goal: u64,
    pub annotation: Regex,
    pub file_filter: FileFilter,
    pub update_hook: Option<PathBuf>,
    pub formats: Formats,
    pub json_output: bool,
}

impl Config {
    pub fn from_count_args(args: &CountArgs, file: ConfigFile) -> Result<Self, ConfigError> {
        let roots = if args.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            args.paths.clone()
        };

        let database = resolve_database(args.database.as_deref(), &file)?;
        if let Some(parent) = database.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::DatabasePath {
                path: database.clone(),
                source,
            })?;
        }
        let base = database
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        let annotation_pattern = args
            .annotation_pattern
            .clone()
            .or(file.annotation_pattern)
            .unwrap_or_else(|| DEFAULT_ANNOTATION_PATTERN.to_string());
        let annotation = compile("annotation pattern", &annotation_pattern)?;

        // a filter given on the command line replaces the config file's entirely
        let (accept, ignore) =
            if args.accept_file_pattern.is_some() || args.ignore_file_pattern.is_some() {
                (args.accept_file_pattern.clone(), args.ignore_file_pattern.clone())
            } else {
                (file.accept_file_pattern, file.ignore_file_pattern)
            };
        let file_filter = match (accept, ignore) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingFilters),
            (Some(p), None) if !p.is_empty() => {
                FileFilter::Accept(compile("accept-file-pattern", &p)?)
            }
            (None, Some(p)) if !p.is_empty() => {
                FileFilter::Ignore(compile("ignore-file-pattern", &p)?)
            }
            _ => FileFilter::All,
        };

        let defaults = Formats::default();
        let formats = Formats {
            header: args.format_header.clone().or(file.format_header).unwrap_or(defaults.header),
            item: args.format_item.clone().or(file.format_item).unwrap_or(defaults.item),
            goal: args.format_goal.clone().or(file.format_goal).unwrap_or(defaults.goal),
        };

        Ok(Config {
            roots,
            database,
            base,
            goal: args.goal.or(file.goal).unwrap_or(0),
            annotation,
            file_filter,
            update_hook: args.update_hook.clone().or(file.update_hook),
            formats,
            json_output: args.json,
        })
    }
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::Pattern {
        name,
        pattern: pattern.to_string(),
        source,
    })
}

/// Absolute database path from the command line, the config file or the
/// default. Nothing is created on disk.
pub fn resolve_database(cli: Option<&Path>, file: &ConfigFile) -> Result<PathBuf, ConfigError> {
    let path = cli
        .map(Path::to_path_buf)
        .or_else(|| file.database.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));

    absolute_database_path(&path).map_err(|source| ConfigError::DatabasePath { path, source })
}

fn absolute_database_path(path: &Path) -> io::Result<PathBuf> {
    if path.file_name().is_none() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"));
    }

    // lexical like document paths, so both sides of a ledger key agree
    paths::absolute(path)
}
