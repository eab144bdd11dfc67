//! JSON reporter — the full run summary as pretty-printed JSON.

use super::{Reporter, RunSummary};

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, summary: &RunSummary) -> Result<String, String> {
        serde_json::to_string_pretty(summary).map_err(|e| format!("JSON serialization failed: {e}"))
    }
}
