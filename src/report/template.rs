//! Placeholder templates for the text report.
//!
//! Header: `#{total}`, `#{today}`, `#{goal}`. The goal format, substituted
//! for `#{goal}` only when a goal is set: `#{target}`, `#{remaining}`.
//! Items: `#{path}`, `#{total}`, `#{prev}`, `#{today}`.

use crate::config::Formats;
use crate::snapshot::DocumentSnapshot;

use super::Summary;

pub fn render_header(summary: &Summary, formats: &Formats) -> String {
    let goal = match summary.remaining {
        Some(remaining) => formats
            .goal
            .replace("#{target}", &summary.goal.to_string())
            .replace("#{remaining}", &remaining.to_string()),
        None => String::new(),
    };

    formats
        .header
        .replace("#{total}", &summary.total.to_string())
        .replace("#{today}", &summary.today.to_string())
        .replace("#{goal}", &goal)
}

pub fn render_item(document: &DocumentSnapshot, format: &str) -> String {
    format
        .replace("#{path}", &document.path)
        .replace("#{total}", &document.words.to_string())
        .replace("#{prev}", &document.previous.to_string())
        .replace("#{today}", &document.today().to_string())
}

/// Header line followed by one line per document; empty formats are skipped.
pub fn render(documents: &[DocumentSnapshot], goal: u64, formats: &Formats) -> String {
    let mut output = String::new();

    if !formats.header.is_empty() {
        output.push_str(&render_header(&Summary::of(documents, goal), formats));
        output.push('\n');
    }

    if !formats.item.is_empty() {
        for document in documents {
            output.push_str(&render_item(document, &formats.item));
            output.push('\n');
        }
    }

    output
}
