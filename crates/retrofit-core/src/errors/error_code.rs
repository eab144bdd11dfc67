//! Stable error codes shared by every retrofit error enum.

/// Every error enum implements this to expose a machine-readable code
/// alongside its `Display` message.
pub trait RetrofitErrorCode {
    /// Returns the error code string (e.g. "SCAN_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const INVALID_PATTERN: &str = "INVALID_PATTERN";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const UNSUPPORTED_LANGUAGE: &str = "UNSUPPORTED_LANGUAGE";
pub const CATALOG_ERROR: &str = "CATALOG_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const APPLY_ERROR: &str = "APPLY_ERROR";
pub const EDIT_CONFLICT: &str = "EDIT_CONFLICT";
pub const PERSIST_FAILED: &str = "PERSIST_FAILED";
pub const PIPELINE_ERROR: &str = "PIPELINE_ERROR";
