//! Reporters — renderings of a detect → generate → apply run.
//!
//! 2 formats: console (human-readable) and JSON.

pub mod console;
pub mod json;
pub mod summary;

pub use summary::{ApplySummary, FailureSummary, RunSummary};

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, summary: &RunSummary) -> Result<String, String>;
}

/// Create a reporter by format name.
pub fn create_reporter(format: &str) -> Option<Box<dyn Reporter>> {
    match format {
        "console" => Some(Box::new(console::ConsoleReporter::default())),
        "json" => Some(Box::new(json::JsonReporter)),
        _ => None,
    }
}

/// List all available reporter format names.
pub fn available_formats() -> &'static [&'static str] {
    &["console", "json"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_format_is_constructible() {
        for format in available_formats() {
            let reporter = create_reporter(format).unwrap();
            assert_eq!(reporter.name(), *format);
        }
        assert!(create_reporter("sarif").is_none());
    }
}
