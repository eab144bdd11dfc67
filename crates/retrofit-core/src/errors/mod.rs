//! Error handling for retrofit.
//! One error enum per subsystem, `thiserror` only.

pub mod apply_error;
pub mod catalog_error;
pub mod config_error;
pub mod error_code;
pub mod parse_error;
pub mod pipeline_error;
pub mod scan_error;

pub use apply_error::ApplyError;
pub use catalog_error::CatalogError;
pub use config_error::ConfigError;
pub use error_code::RetrofitErrorCode;
pub use parse_error::ParseError;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use scan_error::ScanError;
