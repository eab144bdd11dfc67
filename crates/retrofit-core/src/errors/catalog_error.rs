//! Rule catalog errors.

use super::error_code::{self, RetrofitErrorCode};

/// Errors raised while loading a deprecated-API rule catalog.
///
/// Lookups on a loaded catalog never fail; only loading does.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog JSON is malformed: {0}")]
    Malformed(String),

    #[error("Unknown catalog category: {0}")]
    UnknownCategory(String),

    #[error("Catalog has no '{0}' section")]
    MissingSection(String),

    #[error("Could not read catalog {path}: {message}")]
    Unreadable { path: String, message: String },
}

impl RetrofitErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        error_code::CATALOG_ERROR
    }
}
