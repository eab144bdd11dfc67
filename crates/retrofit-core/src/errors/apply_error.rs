//! Fix application errors.

use std::path::PathBuf;

use super::error_code::{self, RetrofitErrorCode};

/// Errors that abort the rewrite of a single file. Other files are unaffected.
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("Edits overlap at bytes {first_end} and {second_start}")]
    OverlappingEdits { first_end: usize, second_start: usize },

    #[error("Edit range {start}..{end} is outside a {len}-byte source")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("Class owning line {line} has no body to edit")]
    MissingClassBody { line: u32 },

    #[error("Constructor state at line {line} is not an object literal; merge it by hand")]
    UnmergeableState { line: u32 },

    #[error("Failed to write {path}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RetrofitErrorCode for ApplyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::OverlappingEdits { .. } | Self::OutOfBounds { .. } => error_code::EDIT_CONFLICT,
            Self::Persist { .. } => error_code::PERSIST_FAILED,
            Self::MissingClassBody { .. } | Self::UnmergeableState { .. } => error_code::APPLY_ERROR,
        }
    }
}
