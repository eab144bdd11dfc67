//! Discovery errors.

use std::path::PathBuf;

use super::error_code::{self, RetrofitErrorCode};

/// Errors that can occur while expanding a path pattern into files.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("IO error scanning {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File too large: {path} ({size} bytes, max {max})")]
    MaxFileSizeExceeded { path: PathBuf, size: u64, max: u64 },
}

impl RetrofitErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPattern { .. } => error_code::INVALID_PATTERN,
            _ => error_code::SCAN_ERROR,
        }
    }
}
