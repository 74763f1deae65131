//! Word count history of a single document.

use crate::store::ledger::LedgerEntry;

fn format_timestamp(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Table of entries oldest first, with the change since the entry before.
pub fn render(path: &str, entries: &[LedgerEntry]) -> String {
    if entries.is_empty() {
        return format!("No word counts recorded for {path}.\n");
    }

    let mut output = format!("History of {path}:\n");
    output.push_str(&format!("{:<20} {:>10} {:>10}\n", "Date (UTC)", "Words", "Change"));
    output.push_str(&"-".repeat(42));
    output.push('\n');

    let mut last: Option<u64> = None;
    for entry in entries {
        let change = match last {
            Some(prev) => {
                let delta = entry.words as i128 - prev as i128;
                format!("{delta:+}")
            }
            None => String::from("-"),
        };
        output.push_str(&format!(
            "{:<20} {:>10} {:>10}\n",
            format_timestamp(entry.timestamp),
            entry.words,
            change
        ));
        last = Some(entry.words);
    }

    output
}

pub fn render_json(entries: &[LedgerEntry]) -> String {
    serde_json::to_string_pretty(entries).unwrap_or_else(|_| String::from("[]"))
}
