//! Detection output types.

use std::path::{Path, PathBuf};

use retrofit_core::errors::PipelineError;
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, DeprecatedApiRule, RuleSeverity};
use crate::parsers::Span;

/// One detected occurrence of a deprecated API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Matched rule name or a literal description such as `this.refs`.
    pub api: String,
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
    pub message: String,
    pub category: Category,
    pub deprecated_in: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_in: Option<String>,
    pub alternative: String,
    pub severity: RuleSeverity,
}

impl Issue {
    /// Build an issue at `span`, copying metadata from `rule`.
    pub fn from_rule(
        rule: &DeprecatedApiRule,
        category: Category,
        api: impl Into<String>,
        file: &Path,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            api: api.into(),
            file: file.to_path_buf(),
            line: span.line,
            column: span.column,
            message: message.into(),
            category,
            deprecated_in: rule.deprecated_in.clone(),
            removed_in: rule.removed_in.clone(),
            alternative: rule.alternative.clone(),
            severity: rule.severity,
        }
    }
}

/// How a detection run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionOutcome {
    /// The pattern matched no files. Informational, not an error.
    NoFilesFound,
    /// Files were scanned and nothing deprecated was found.
    Clean,
    IssuesFound,
}

/// Issues for a batch of files plus the non-fatal failures met on the way.
#[derive(Debug, Default)]
pub struct DetectionReport {
    pub issues: Vec<Issue>,
    pub files_found: usize,
    /// Files that were read and parsed.
    pub files_scanned: usize,
    pub errors: Vec<PipelineError>,
}

impl DetectionReport {
    pub fn outcome(&self) -> DetectionOutcome {
        if self.files_found == 0 {
            DetectionOutcome::NoFilesFound
        } else if self.issues.is_empty() {
            DetectionOutcome::Clean
        } else {
            DetectionOutcome::IssuesFound
        }
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.issues.iter().filter(|i| i.category == category).count()
    }
}
