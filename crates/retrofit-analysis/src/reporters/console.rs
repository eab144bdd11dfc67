//! Console reporter — issues by category, fix previews, totals.

use std::path::Path;

use super::{Reporter, RunSummary};
use crate::detectors::DetectionOutcome;
use crate::fixes::Confidence;

const RULE_WIDTH: usize = 70;

/// Console reporter for human-readable terminal output.
pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn confidence_symbol(&self, confidence: Confidence) -> &'static str {
        match confidence {
            Confidence::High => "✓",
            Confidence::Medium => "⚠",
            Confidence::Low => "✗",
        }
    }

    fn color_start(&self, confidence: Confidence) -> &'static str {
        if !self.use_color {
            return "";
        }
        match confidence {
            Confidence::High => "\x1b[32m",   // green
            Confidence::Medium => "\x1b[33m", // yellow
            Confidence::Low => "\x1b[31m",    // red
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, summary: &RunSummary) -> Result<String, String> {
        let mut output = String::new();
        let rule = "=".repeat(RULE_WIDTH);

        if summary.dry_run {
            output.push_str("DRY RUN - no files will be modified\n\n");
        }

        match summary.outcome {
            DetectionOutcome::NoFilesFound => {
                output.push_str(&format!(
                    "No files matched '{}'. Check the path or use an absolute pattern.\n",
                    summary.pattern
                ));
                return Ok(output);
            }
            DetectionOutcome::Clean => {
                output.push_str(&format!(
                    "No issues found in {} file(s).\n",
                    summary.files_scanned
                ));
                self.push_errors(&mut output, summary);
                return Ok(output);
            }
            DetectionOutcome::IssuesFound => {}
        }

        output.push_str(&format!(
            "Found {} issue(s) in {} file(s)\n",
            summary.issues.len(),
            summary.files_scanned
        ));

        // Issues by category
        for (category, issues) in summary.issues_by_category() {
            output.push_str(&format!("\n{} ({} issues):\n", category, issues.len()));
            for issue in issues {
                output.push_str(&format!(
                    "  {}:{} - {}\n     {}\n     Use instead: {}\n",
                    file_name(&issue.file),
                    issue.line,
                    issue.api,
                    issue.message,
                    issue.alternative
                ));
            }
        }
        output.push_str(&format!("\n{rule}\n"));

        if summary.fixes.is_empty() {
            output.push_str("\nNo automatic fixes available; all issues require manual review.\n");
        } else {
            let stats = summary.fix_summary;
            output.push_str(&format!(
                "\nFix statistics:\n   High confidence: {}\n   Medium confidence: {}\n   Low confidence: {}\n",
                stats.high, stats.medium, stats.low
            ));

            output.push_str(&format!("\nPreview of changes:\n{rule}\n"));
            for fix in &summary.fixes {
                let cs = self.color_start(fix.confidence);
                let ce = self.color_end();
                output.push_str(&format!(
                    "\n{cs}{} {}:{} [{}]{ce}\n   Deprecated: {}\n   Action: {} ({})\n   Before:\n{}\n   After:\n{}\n",
                    self.confidence_symbol(fix.confidence),
                    file_name(&fix.file),
                    fix.line,
                    fix.confidence.to_string().to_uppercase(),
                    fix.api,
                    fix.fix_type,
                    fix.description,
                    fix.before,
                    fix.after
                ));
            }
            output.push_str(&format!("\n{rule}\n"));
        }

        match &summary.apply {
            None => output.push_str("\nDry run - no changes applied\n"),
            Some(apply) => {
                output.push_str(&format!(
                    "\nApplied {} fix(es) to {} file(s)\n",
                    apply.applied,
                    apply.succeeded.len()
                ));
                if apply.skipped_stale > 0 {
                    output.push_str(&format!(
                        "  {} fix(es) skipped: the code changed since detection\n",
                        apply.skipped_stale
                    ));
                }
                for failure in &apply.failed {
                    output.push_str(&format!(
                        "  FAILED {}: {}\n",
                        file_name(&failure.file),
                        failure.error
                    ));
                }
            }
        }

        self.push_errors(&mut output, summary);

        // Summary
        output.push_str(&format!(
            "\nSummary:\n   Total issues: {}\n   Fixes generated: {}\n   Auto-fixable: {}\n   Need review: {}\n",
            summary.issues.len(),
            summary.fixes.len(),
            summary.auto_fixable(),
            summary.needs_review()
        ));

        Ok(output)
    }
}

impl ConsoleReporter {
    fn push_errors(&self, output: &mut String, summary: &RunSummary) {
        if summary.errors.is_empty() {
            return;
        }
        output.push_str(&format!("\n{} file(s) could not be fully scanned:\n", summary.errors.len()));
        for error in &summary.errors {
            output.push_str(&format!("  {error}\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, RuleSeverity};
    use crate::detectors::{DetectionReport, Issue};
    use crate::fixes::{ApplyReport, Fix, FixType, Pattern};

    fn issue(category: Category, api: &str) -> Issue {
        Issue {
            api: api.to_string(),
            file: "src/App.tsx".into(),
            line: 4,
            column: 3,
            message: format!("Deprecated: {api}"),
            category,
            deprecated_in: "16.3".to_string(),
            removed_in: None,
            alternative: "componentDidMount".to_string(),
            severity: RuleSeverity::Warning,
        }
    }

    fn summary(dry_run: bool) -> RunSummary {
        let detection = DetectionReport {
            issues: vec![
                issue(Category::LifecycleMethods, "componentWillMount"),
                issue(Category::Refs, "this.refs"),
                issue(Category::LifecycleMethods, "componentWillUpdate"),
            ],
            files_found: 1,
            files_scanned: 1,
            errors: Vec::new(),
        };
        let fix = Fix {
            api: "componentWillMount".to_string(),
            file: "src/App.tsx".into(),
            line: 4,
            category: Category::LifecycleMethods,
            pattern: Pattern::Empty,
            description: "Remove empty componentWillMount".to_string(),
            before: "componentWillMount() {}".to_string(),
            after: "// Removed empty componentWillMount".to_string(),
            fix_type: FixType::Remove,
            confidence: Confidence::High,
            urgency: None,
        };
        RunSummary::new("src/**/*.tsx", dry_run, detection, vec![fix], &[])
    }

    #[test]
    fn groups_issues_and_previews_fixes() {
        let out = ConsoleReporter::new(false).generate(&summary(true)).unwrap();
        assert!(out.starts_with("DRY RUN"));
        assert!(out.contains("lifecycleMethods (2 issues):"));
        assert!(out.contains("refs (1 issues):"));
        assert!(out.find("lifecycleMethods").unwrap() < out.find("refs (").unwrap());
        assert!(out.contains("✓ App.tsx:4 [HIGH]"));
        assert!(out.contains("Action: remove (Remove empty componentWillMount)"));
        assert!(out.contains("Dry run - no changes applied"));
        assert!(out.contains("Auto-fixable: 1"));
        assert!(out.contains("Need review: 2"));
        assert!(!out.contains("\x1b["));
    }

    #[test]
    fn threshold_widens_auto_fixable() {
        let mut summary = summary(true);
        summary.fixes[0].confidence = Confidence::Medium;
        summary.fix_summary = crate::fixes::FixSummary::from_fixes(&summary.fixes);
        let strict = ConsoleReporter::new(false).generate(&summary).unwrap();
        assert!(strict.contains("Auto-fixable: 0"));

        let relaxed = summary.with_min_confidence(Confidence::Medium);
        let out = ConsoleReporter::new(false).generate(&relaxed).unwrap();
        assert!(out.contains("Auto-fixable: 1"));
    }

    #[test]
    fn reports_apply_outcome() {
        let report = ApplyReport {
            succeeded: vec!["src/App.tsx".into()],
            applied: 1,
            ..Default::default()
        };
        let out = ConsoleReporter::new(false)
            .generate(&summary(false).with_apply(&report))
            .unwrap();
        assert!(out.contains("Applied 1 fix(es) to 1 file(s)"));
        assert!(!out.contains("Dry run"));
    }

    #[test]
    fn zero_files_is_explained() {
        let detection = DetectionReport::default();
        let summary = RunSummary::new("nowhere/**/*.tsx", false, detection, Vec::new(), &[]);
        let out = ConsoleReporter::new(false).generate(&summary).unwrap();
        assert!(out.contains("No files matched 'nowhere/**/*.tsx'"));
    }
}
