pub mod history;
pub mod json;
pub mod template;

use serde::Serialize;

use crate::config::Config;
use crate::scan::ScanResult;
use crate::snapshot::DocumentSnapshot;

/// Totals across all counted documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: u64,
    pub today: i64,
    pub goal: u64,
    /// goal minus today, only when a goal is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<i64>,
}

impl Summary {
    pub fn of(documents: &[DocumentSnapshot], goal: u64) -> Self {
        let total = documents.iter().fold(0u64, |acc, d| acc.saturating_add(d.words));
        let today = documents.iter().fold(0i64, |acc, d| acc.saturating_add(d.today()));
        let remaining = (goal > 0)
            .then(|| i64::try_from(goal).unwrap_or(i64::MAX).saturating_sub(today));

        Summary {
            total,
            today,
            goal,
            remaining,
        }
    }
}

pub fn print(result: &ScanResult, config: &Config) {
    if config.json_output {
        println!("{}", json::render(result, config.goal));
    } else {
        print!("{}", template::render(&result.documents, config.goal, &config.formats));
    }
}
