//! retrofit-core: shared plumbing for the retrofit scanner.
//!
//! - Errors: one `thiserror` enum per subsystem, each with a stable error code
//! - Config: layered TOML configuration (`retrofit.toml`)
//! - Tracing: `RETROFIT_LOG`-driven subscriber setup

pub mod config;
pub mod errors;
pub mod tracing;

pub use config::RetrofitConfig;
pub use errors::{PipelineError, PipelineResult, RetrofitErrorCode};
