//! Fix model: patterns, fix kinds, confidence and the batch report.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use retrofit_core::errors::PipelineError;
use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// Behavioral label for a flagged method body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pattern {
    #[serde(rename = "empty")]
    Empty,
    #[serde(rename = "setState-only")]
    SetStateOnly,
    #[serde(rename = "async")]
    Async,
    #[serde(rename = "complex")]
    Complex,
    #[serde(rename = "simple-logging")]
    SimpleLogging,
    #[serde(rename = "simple-side-effect")]
    SimpleSideEffect,
    #[serde(rename = "unsafe-prefix")]
    UnsafePrefix,
}

impl Pattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Empty => "empty",
            Pattern::SetStateOnly => "setState-only",
            Pattern::Async => "async",
            Pattern::Complex => "complex",
            Pattern::SimpleLogging => "simple-logging",
            Pattern::SimpleSideEffect => "simple-side-effect",
            Pattern::UnsafePrefix => "unsafe-prefix",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixType {
    Remove,
    MoveToConstructor,
    Rename,
    ManualReview,
}

impl fmt::Display for FixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FixType::Remove => "remove",
            FixType::MoveToConstructor => "move-to-constructor",
            FixType::Rename => "rename",
            FixType::ManualReview => "manual-review",
        })
    }
}

/// Self-assessed safety. Ordered so that `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        })
    }
}

impl FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Confidence::High),
            "medium" => Ok(Confidence::Medium),
            "low" => Ok(Confidence::Low),
            other => Err(format!("unknown confidence '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

/// A proposed remediation for exactly one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    pub api: String,
    pub file: PathBuf,
    pub line: u32,
    pub category: Category,
    pub pattern: Pattern,
    pub description: String,
    /// Exact original text of the method.
    pub before: String,
    pub after: String,
    #[serde(rename = "type")]
    pub fix_type: FixType,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
}

impl Fix {
    pub fn is_auto_applicable(&self) -> bool {
        self.confidence == Confidence::High
    }
}

/// Fix counts per confidence level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl FixSummary {
    pub fn from_fixes(fixes: &[Fix]) -> Self {
        let mut summary = Self::default();
        for fix in fixes {
            match fix.confidence {
                Confidence::High => summary.high += 1,
                Confidence::Medium => summary.medium += 1,
                Confidence::Low => summary.low += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }

    /// Fixes at or above `threshold`.
    pub fn at_least(&self, threshold: Confidence) -> usize {
        match threshold {
            Confidence::High => self.high,
            Confidence::Medium => self.high + self.medium,
            Confidence::Low => self.total(),
        }
    }
}

/// A file whose rewrite failed; it was left untouched on disk.
#[derive(Debug)]
pub struct FileFailure {
    pub file: PathBuf,
    pub error: PipelineError,
}

/// Outcome of applying a batch of fixes.
#[derive(Debug, Default)]
pub struct ApplyReport {
    /// Files rewritten and persisted.
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<FileFailure>,
    /// High-confidence fixes written to disk.
    pub applied: usize,
    /// High-confidence fixes whose method could no longer be found.
    pub skipped_stale: usize,
    /// Fixes below high confidence, never applied.
    pub manual_review: usize,
}

impl ApplyReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
