//! Scanner subsystem — path pattern expansion into an ordered file list.
//!
//! Discovery is the entry point to the detection pipeline: it expands `~`,
//! splits a pattern into a literal base and a glob remainder, walks the base
//! with the `ignore` crate, and returns matching files in sorted order.

pub mod discovery;
pub mod ignores;
pub mod language_detect;

pub use discovery::{discover, Discovery};
pub use ignores::IgnorePatterns;
pub use language_detect::Language;
