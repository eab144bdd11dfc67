//! Pipeline errors and non-fatal error collection.

use super::error_code::{self, RetrofitErrorCode};
use super::{ApplyError, CatalogError, ConfigError, ParseError, ScanError};

/// Errors that can occur during a detect → generate → apply run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Apply error: {0}")]
    Apply(#[from] ApplyError),

    #[error("Detector {detector} failed on {file}: {message}")]
    Detector {
        detector: String,
        file: String,
        message: String,
    },
}

impl RetrofitErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Scan(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::Catalog(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Apply(e) => e.error_code(),
            Self::Detector { .. } => error_code::PIPELINE_ERROR,
        }
    }
}

/// Result of a pipeline stage that accumulates non-fatal errors.
/// Partial results survive even when some files fail.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the stage.
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// Add a non-fatal error to the result.
    pub fn add_error(&mut self, error: PipelineError) {
        self.errors.push(error);
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
