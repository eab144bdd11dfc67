//! Serializable snapshot of one run, shared by every reporter.

use std::path::PathBuf;

use retrofit_core::errors::{PipelineError, RetrofitErrorCode};
use serde::Serialize;

use crate::catalog::Category;
use crate::detectors::{DetectionOutcome, DetectionReport, Issue};
use crate::fixes::{ApplyReport, Confidence, Fix, FixSummary};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub pattern: String,
    pub dry_run: bool,
    pub outcome: DetectionOutcome,
    pub files_found: usize,
    pub files_scanned: usize,
    pub issues: Vec<Issue>,
    pub fixes: Vec<Fix>,
    pub fix_summary: FixSummary,
    /// Lowest confidence counted as auto-fixable in totals.
    pub min_confidence: Confidence,
    /// Absent for dry runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply: Option<ApplySummary>,
    /// Non-fatal detection and generation errors, as coded strings.
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplySummary {
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<FailureSummary>,
    pub applied: usize,
    pub skipped_stale: usize,
    pub manual_review: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureSummary {
    pub file: PathBuf,
    pub error: String,
}

impl RunSummary {
    /// Summarize detection and generation. Consumes the detection report.
    pub fn new(
        pattern: &str,
        dry_run: bool,
        detection: DetectionReport,
        fixes: Vec<Fix>,
        generation_errors: &[PipelineError],
    ) -> Self {
        let outcome = detection.outcome();
        let errors = detection
            .errors
            .iter()
            .chain(generation_errors)
            .map(RetrofitErrorCode::coded_string)
            .collect();
        Self {
            pattern: pattern.to_string(),
            dry_run,
            outcome,
            files_found: detection.files_found,
            files_scanned: detection.files_scanned,
            issues: detection.issues,
            fix_summary: FixSummary::from_fixes(&fixes),
            fixes,
            min_confidence: Confidence::High,
            apply: None,
            errors,
        }
    }

    pub fn with_min_confidence(mut self, min_confidence: Confidence) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn with_apply(mut self, report: &ApplyReport) -> Self {
        self.apply = Some(ApplySummary {
            succeeded: report.succeeded.clone(),
            failed: report
                .failed
                .iter()
                .map(|f| FailureSummary {
                    file: f.file.clone(),
                    error: f.error.coded_string(),
                })
                .collect(),
            applied: report.applied,
            skipped_stale: report.skipped_stale,
            manual_review: report.manual_review,
        });
        self
    }

    /// Issues grouped by category in first-seen order.
    pub fn issues_by_category(&self) -> Vec<(Category, Vec<&Issue>)> {
        let mut groups: Vec<(Category, Vec<&Issue>)> = Vec::new();
        for issue in &self.issues {
            match groups.iter_mut().find(|(c, _)| *c == issue.category) {
                Some((_, list)) => list.push(issue),
                None => groups.push((issue.category, vec![issue])),
            }
        }
        groups
    }

    /// Fixes at or above `min_confidence`.
    pub fn auto_fixable(&self) -> usize {
        self.fix_summary.at_least(self.min_confidence)
    }

    /// Issues with no fix, or whose fix is below `min_confidence`.
    pub fn needs_review(&self) -> usize {
        self.issues.len().saturating_sub(self.auto_fixable())
    }
}
