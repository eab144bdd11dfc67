//! Deprecated-API rule catalog — loaded once, read-only afterwards.

pub mod loader;
pub mod types;

pub use types::{Category, DeprecatedApiRule, RuleCatalog, RuleSeverity};
