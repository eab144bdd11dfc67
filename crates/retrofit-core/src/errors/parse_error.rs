//! Parser errors.

use std::path::PathBuf;

use super::error_code::{self, RetrofitErrorCode};

/// Errors that can occur while building a syntax tree for one file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Unsupported file extension: {extension}")]
    UnsupportedLanguage { extension: String },

    #[error("Grammar could not be loaded for {language}: {message}")]
    GrammarNotLoaded { language: String, message: String },

    #[error("Tree-sitter produced no tree for {path}")]
    NoTree { path: PathBuf },

    #[error("Could not read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RetrofitErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedLanguage { .. } => error_code::UNSUPPORTED_LANGUAGE,
            _ => error_code::PARSE_ERROR,
        }
    }
}
