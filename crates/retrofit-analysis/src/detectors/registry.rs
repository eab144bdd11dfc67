//! Ordered scanner registry with per-scanner failure isolation.

use std::panic::{catch_unwind, AssertUnwindSafe};

use retrofit_core::errors::{PipelineError, PipelineResult};

use super::context::LegacyContextScanner;
use super::dom::FindDomNodeScanner;
use super::factory::CreateFactoryScanner;
use super::imports::TestUtilsImportScanner;
use super::lifecycle::LifecycleScanner;
use super::patterns::DefaultPropsScanner;
use super::refs::StringRefScanner;
use super::rendering::RenderApiScanner;
use super::traits::{DeprecationScanner, ScanContext};
use super::types::Issue;

/// Scanners run in registration order; their output is concatenated.
pub struct ScannerRegistry {
    scanners: Vec<Box<dyn DeprecationScanner>>,
}

impl Default for ScannerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ScannerRegistry {
    pub fn empty() -> Self {
        Self {
            scanners: Vec::new(),
        }
    }

    /// The eight category scanners in their fixed order.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(LifecycleScanner));
        registry.register(Box::new(StringRefScanner));
        registry.register(Box::new(LegacyContextScanner));
        registry.register(Box::new(FindDomNodeScanner));
        registry.register(Box::new(RenderApiScanner));
        registry.register(Box::new(CreateFactoryScanner));
        registry.register(Box::new(DefaultPropsScanner));
        registry.register(Box::new(TestUtilsImportScanner));
        registry
    }

    pub fn register(&mut self, scanner: Box<dyn DeprecationScanner>) {
        self.scanners.push(scanner);
    }

    pub fn len(&self) -> usize {
        self.scanners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scanners.is_empty()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.scanners.iter().map(|s| s.id()).collect()
    }

    /// Run every scanner over one file.
    ///
    /// A scanner that panics contributes no issues and is recorded as an
    /// error; the remaining scanners still run.
    pub fn run(&self, ctx: &ScanContext<'_>) -> PipelineResult<Vec<Issue>> {
        let mut result = PipelineResult::new(Vec::new());
        for scanner in &self.scanners {
            match catch_unwind(AssertUnwindSafe(|| scanner.scan(ctx))) {
                Ok(issues) => result.data.extend(issues),
                Err(panic) => {
                    let message = panic
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| panic.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "scanner panicked".to_string());
                    tracing::warn!(
                        scanner = scanner.id(),
                        file = %ctx.file.display(),
                        %message,
                        "scanner failed"
                    );
                    result.add_error(PipelineError::Detector {
                        detector: scanner.id().to_string(),
                        file: ctx.file.display().to_string(),
                        message,
                    });
                }
            }
        }
        result
    }
}
