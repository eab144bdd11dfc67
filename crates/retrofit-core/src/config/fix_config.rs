//! Fix generation and application configuration.

use serde::{Deserialize, Serialize};

/// Confidence names accepted by `fix.min_confidence`.
pub const CONFIDENCE_LEVELS: &[&str] = &["high", "medium", "low"];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FixConfig {
    /// Report fixes without touching files. Default: false.
    pub dry_run: Option<bool>,
    /// Lowest confidence listed as auto-fixable in reports. Default: "high".
    /// Only `high` fixes are ever written to disk regardless of this value.
    pub min_confidence: Option<String>,
}

impl FixConfig {
    pub fn effective_dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }

    pub fn effective_min_confidence(&self) -> &str {
        self.min_confidence.as_deref().unwrap_or("high")
    }
}
