//! retrofit-analysis: finds deprecated React APIs and rewrites the safe ones.
//!
//! - Catalog: the deprecated-API rule table, grouped by category
//! - Scanner: path/glob expansion into source files
//! - Parsers: tree-sitter backed syntax provider for TS/TSX/JS/JSX
//! - Detectors: eight per-category scanners producing `Issue`s
//! - Fixes: lifecycle body classification, fix generation, fix application
//! - Reporters: console and JSON renderings of a run

pub mod catalog;
pub mod detectors;
pub mod fixes;
pub mod parsers;
pub mod reporters;
pub mod scanner;

pub use catalog::{Category, DeprecatedApiRule, RuleCatalog, RuleSeverity};
pub use detectors::{DetectionOutcome, DetectionReport, Detector, Issue};
pub use fixes::{
    classify, ApplyReport, Confidence, Fix, FixApplier, FixGenerator, FixType, Pattern, Urgency,
};
pub use parsers::{SourceTree, SyntaxProvider, TreeSitterProvider};
pub use reporters::{create_reporter, Reporter, RunSummary};
