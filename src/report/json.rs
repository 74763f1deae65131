//! JSON output for scripting and piping.

use serde::Serialize;

use crate::scan::ScanResult;
use crate::snapshot::DocumentSnapshot;

use super::Summary;

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    summary: Summary,
    documents: Vec<DocumentReport<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u128>,
}

#[derive(Serialize)]
struct DocumentReport<'a> {
    #[serde(flatten)]
    snapshot: &'a DocumentSnapshot,
    today: i64,
}

pub fn render(result: &ScanResult, goal: u64) -> String {
    let report = Report {
        summary: Summary::of(&result.documents, goal),
        documents: result
            .documents
            .iter()
            .map(|snapshot| DocumentReport {
                snapshot,
                today: snapshot.today(),
            })
            .collect(),
        skipped: result.diagnostics.clone(),
        duration_ms: result.duration_ms,
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|_| String::from("{}"))
}
