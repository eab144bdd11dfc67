//! Language detection from file extension.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Source dialects the syntax provider can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    TypeScript,
    Tsx,
    JavaScript,
}

impl Language {
    /// Detect language from a file extension string.
    pub fn from_extension(ext: Option<&str>) -> Option<Language> {
        match ext? {
            "ts" | "mts" | "cts" => Some(Language::TypeScript),
            "tsx" => Some(Language::Tsx),
            // The JavaScript grammar parses JSX natively.
            "js" | "jsx" | "mjs" | "cjs" => Some(Language::JavaScript),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Language> {
        Self::from_extension(path.extension().and_then(|e| e.to_str()))
    }

    /// Returns all file extensions associated with this language.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::TypeScript => &["ts", "mts", "cts"],
            Language::Tsx => &["tsx"],
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::Tsx => "TSX",
            Language::JavaScript => "JavaScript",
        }
    }

    /// Get the tree-sitter grammar for this language.
    pub fn ts_language(&self) -> tree_sitter::Language {
        match self {
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_language() {
        assert_eq!(Language::from_path(Path::new("a/App.tsx")), Some(Language::Tsx));
        assert_eq!(Language::from_path(Path::new("util.mts")), Some(Language::TypeScript));
        assert_eq!(Language::from_path(Path::new("legacy.jsx")), Some(Language::JavaScript));
        assert_eq!(Language::from_path(Path::new("styles.css")), None);
        assert_eq!(Language::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn extensions_round_trip() {
        for lang in [Language::TypeScript, Language::Tsx, Language::JavaScript] {
            for ext in lang.extensions() {
                assert_eq!(Language::from_extension(Some(ext)), Some(lang));
            }
        }
    }
}
