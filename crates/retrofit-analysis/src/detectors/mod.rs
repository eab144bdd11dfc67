//! Detector system — eight category scanners over one parsed file at a time.
//!
//! `Detector` owns the catalog and a `SyntaxProvider`. Failures to read or
//! parse a file, and scanners that panic, are recorded on the report and
//! never abort the batch.

pub mod context;
pub mod dom;
pub mod factory;
pub mod imports;
pub mod lifecycle;
pub mod patterns;
pub mod refs;
pub mod registry;
pub mod rendering;
pub mod traits;
pub mod types;

use std::path::{Path, PathBuf};

use retrofit_core::errors::{ParseError, PipelineError, PipelineResult, ScanError};

use crate::catalog::RuleCatalog;
use crate::parsers::{SourceTree, SyntaxProvider, TreeSitterProvider};

pub use registry::ScannerRegistry;
pub use traits::{DeprecationScanner, ScanContext};
pub use types::{DetectionOutcome, DetectionReport, Issue};

/// Runs every registered scanner over each file of a pattern.
pub struct Detector<P: SyntaxProvider = TreeSitterProvider> {
    catalog: RuleCatalog,
    provider: P,
    registry: ScannerRegistry,
}

impl Detector<TreeSitterProvider> {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self::with_provider(catalog, TreeSitterProvider::default())
    }
}

impl<P: SyntaxProvider> Detector<P> {
    pub fn with_provider(catalog: RuleCatalog, provider: P) -> Self {
        Self {
            catalog,
            provider,
            registry: ScannerRegistry::with_defaults(),
        }
    }

    /// Replace the scanner set.
    pub fn with_registry(mut self, registry: ScannerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Discover files for `pattern` and scan them in order.
    ///
    /// Only a malformed pattern is an error. A pattern matching nothing
    /// yields an empty report whose outcome is `NoFilesFound`.
    pub fn detect(&self, pattern: &str) -> Result<DetectionReport, ScanError> {
        let discovery = self.provider.discover(pattern)?;
        tracing::info!(pattern, files = discovery.len(), "scanning");

        let mut report = self.detect_files(&discovery.files);
        report
            .errors
            .extend(discovery.skipped.into_iter().map(PipelineError::from));

        if report.outcome() == DetectionOutcome::NoFilesFound {
            tracing::info!(pattern, "no files found; check the path or use an absolute pattern");
        }
        Ok(report)
    }

    /// Scan an explicit file list.
    pub fn detect_files(&self, files: &[PathBuf]) -> DetectionReport {
        let mut report = DetectionReport {
            files_found: files.len(),
            ..Default::default()
        };

        for path in files {
            tracing::debug!(path = %path.display(), "checking");
            let tree = match self.provider.load(path) {
                Ok(tree) => tree,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping file");
                    report.errors.push(e.into());
                    continue;
                }
            };
            report.files_scanned += 1;

            let result = self.detect_tree(&tree);
            report.issues.extend(result.data);
            report.errors.extend(result.errors);
        }

        tracing::info!(
            files = report.files_scanned,
            issues = report.issues.len(),
            errors = report.errors.len(),
            "scan complete"
        );
        report
    }

    /// Parse in-memory source and scan it.
    pub fn detect_source(&self, path: &Path, source: &str) -> Result<PipelineResult<Vec<Issue>>, ParseError> {
        let tree = self.provider.parse(path, source)?;
        Ok(self.detect_tree(&tree))
    }

    /// Scan an already-parsed tree.
    pub fn detect_tree(&self, tree: &SourceTree) -> PipelineResult<Vec<Issue>> {
        let nodes = tree.nodes();
        let ctx = ScanContext {
            file: &tree.path,
            tree,
            catalog: &self.catalog,
            nodes: &nodes,
        };
        let result = self.registry.run(&ctx);
        for issue in &result.data {
            tracing::debug!(api = %issue.api, line = issue.line, category = %issue.category, "found");
        }
        result
    }
}
