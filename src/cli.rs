use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Track word counts and daily progress toward a writing goal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Count words, record changes and print today's progress
    Count(CountArgs),

    /// Show the recorded word count history of one document
    History(HistoryArgs),
}

#[derive(Parser)]
pub struct CountArgs {
    /// Documents or directories to count (defaults to the current directory)
    pub paths: Vec<PathBuf>,

    /// Path to the database, document paths are stored relative to its directory
    #[arg(long, short = 'd')]
    pub database: Option<PathBuf>,

    /// Number of words for the daily goal
    #[arg(long, short = 'g')]
    pub goal: Option<u64>,

    /// Regex for line fragments that don't count towards the total
    #[arg(long, short = 'a')]
    pub annotation_pattern: Option<String>,

    /// Regex for file paths to accept
    #[arg(long, conflicts_with = "ignore_file_pattern")]
    pub accept_file_pattern: Option<String>,

    /// Regex for file paths to ignore
    #[arg(long)]
    pub ignore_file_pattern: Option<String>,

    /// Executable to run whenever a word count changes, called with <path> <new> <old>
    #[arg(long)]
    pub update_hook: Option<PathBuf>,

    /// Format for the header line, empty to disable
    #[arg(long)]
    pub format_header: Option<String>,

    /// Format for each document line, empty to disable
    #[arg(long)]
    pub format_item: Option<String>,

    /// Format substituted for #{goal} in the header when a goal is set
    #[arg(long)]
    pub format_goal: Option<String>,

    /// Output as JSON instead of formatted lines
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show debug logging
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

#[derive(Parser)]
pub struct HistoryArgs {
    /// Document path as stored in the database (relative to the database directory)
    pub path: String,

    /// Path to the database
    #[arg(long, short = 'd')]
    pub database: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show debug logging
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}
