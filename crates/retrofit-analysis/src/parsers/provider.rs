//! The capability surface the detector and fix applier depend on.

use std::path::Path;

use retrofit_core::config::ScanConfig;
use retrofit_core::errors::{ApplyError, ParseError, ScanError};

use super::types::SourceTree;
use super::typescript::parse_source;
use crate::scanner::{self, Discovery, Language};

/// Loads, parses and persists source files.
///
/// The detector and applier only see this trait, so tests can substitute
/// an in-memory provider or one whose writes fail.
pub trait SyntaxProvider {
    /// Expand a path/glob pattern into files.
    fn discover(&self, pattern: &str) -> Result<Discovery, ScanError>;

    fn read(&self, path: &Path) -> Result<String, ParseError>;

    fn parse(&self, path: &Path, source: &str) -> Result<SourceTree, ParseError>;

    /// Write rewritten contents back.
    fn persist(&self, path: &Path, contents: &str) -> Result<(), ApplyError>;

    fn load(&self, path: &Path) -> Result<SourceTree, ParseError> {
        let source = self.read(path)?;
        self.parse(path, &source)
    }
}

/// Filesystem-backed provider using the TypeScript and JavaScript grammars.
#[derive(Debug, Clone, Default)]
pub struct TreeSitterProvider {
    scan: ScanConfig,
}

impl TreeSitterProvider {
    pub fn new(scan: ScanConfig) -> Self {
        Self { scan }
    }
}

impl SyntaxProvider for TreeSitterProvider {
    fn discover(&self, pattern: &str) -> Result<Discovery, ScanError> {
        scanner::discover(pattern, &self.scan)
    }

    fn read(&self, path: &Path) -> Result<String, ParseError> {
        std::fs::read_to_string(path).map_err(|source| ParseError::Unreadable {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(&self, path: &Path, source: &str) -> Result<SourceTree, ParseError> {
        let language = Language::from_path(path).ok_or_else(|| ParseError::UnsupportedLanguage {
            extension: path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
        })?;
        let tree = parse_source(path, source, language)?;
        if tree.has_errors() {
            tracing::debug!(
                path = %path.display(),
                errors = tree.error_count,
                "parsed with syntax errors"
            );
        }
        Ok(tree)
    }

    fn persist(&self, path: &Path, contents: &str) -> Result<(), ApplyError> {
        std::fs::write(path, contents).map_err(|source| ApplyError::Persist {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn picks_grammar_by_extension() {
        let provider = TreeSitterProvider::default();
        let tree = provider
            .parse(Path::new("a.tsx"), "const x = <div ref=\"a\" />;")
            .unwrap();
        assert_eq!(tree.language, Language::Tsx);
        assert_eq!(tree.jsx_elements.len(), 1);

        let err = provider.parse(Path::new("a.vue"), "").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedLanguage { ref extension } if extension == "vue"));
    }

    #[test]
    fn read_and_persist_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("A.jsx");
        let provider = TreeSitterProvider::default();

        provider.persist(&path, "class A {}").unwrap();
        let tree = provider.load(&path).unwrap();
        assert_eq!(tree.classes.len(), 1);

        let missing = provider.read(&dir.path().join("missing.jsx")).unwrap_err();
        assert!(matches!(missing, ParseError::Unreadable { .. }));
    }

    #[test]
    fn persist_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let provider = TreeSitterProvider::default();
        let err = provider
            .persist(&dir.path().join("no/such/dir/A.jsx"), "x")
            .unwrap_err();
        assert!(matches!(err, ApplyError::Persist { .. }));
    }
}
