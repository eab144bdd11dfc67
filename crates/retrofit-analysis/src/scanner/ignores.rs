//! Default ignore patterns for front-end source trees.
//!
//! These keep discovery out of dependency folders, build output and
//! generated bundles, which would otherwise dominate a React project.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use retrofit_core::errors::ScanError;

/// Project-local ignore file, gitignore syntax.
pub const IGNORE_FILE: &str = ".retrofitignore";

/// Default directories to always ignore
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    // Package managers
    "node_modules",
    ".pnpm",
    ".pnpm-store",
    ".yarn",
    ".npm",
    "bower_components",
    "jspm_packages",
    // Version control
    ".git",
    ".svn",
    ".hg",
    // IDE/Editor
    ".idea",
    ".vscode",
    // Build outputs
    "dist",
    "build",
    "out",
    "lib-esm",
    "storybook-static",
    // Coverage/Testing
    "coverage",
    ".nyc_output",
    "__snapshots__",
    // Framework caches
    ".cache",
    ".parcel-cache",
    ".next",
    ".nuxt",
    ".turbo",
    ".vercel",
    ".docusaurus",
    ".expo",
    // Temp
    "tmp",
    "temp",
];

/// Generated or bundled files that are never hand-written components.
pub const DEFAULT_IGNORE_FILES: &[&str] = &[
    "*.min.js",
    "*.bundle.js",
    "*.chunk.js",
    "*.map",
    "*.d.ts",
    "*.generated.*",
];

/// Compiled gitignore matcher for defaults + custom patterns.
#[derive(Debug, Clone)]
pub struct IgnorePatterns {
    gitignore: Gitignore,
}

impl IgnorePatterns {
    /// Create ignore patterns rooted at `root` from defaults, `extra_patterns`
    /// and an optional `.retrofitignore` file.
    pub fn new(root: &Path, extra_patterns: &[String]) -> Result<Self, ScanError> {
        let mut builder = GitignoreBuilder::new(root);

        for pattern in DEFAULT_IGNORE_DIRS.iter().chain(DEFAULT_IGNORE_FILES) {
            add_line(&mut builder, pattern)?;
        }
        for pattern in extra_patterns {
            add_line(&mut builder, pattern)?;
        }

        let ignore_file = root.join(IGNORE_FILE);
        if ignore_file.is_file() {
            if let Some(err) = builder.add(&ignore_file) {
                tracing::warn!(path = %ignore_file.display(), error = %err, "skipping unreadable ignore file");
            }
        }

        let gitignore = builder.build().map_err(|e| ScanError::InvalidPattern {
            pattern: IGNORE_FILE.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { gitignore })
    }

    /// Check if a path (relative to the root) should be ignored
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.gitignore.matched(path, is_dir).is_ignore()
    }
}

fn add_line(builder: &mut GitignoreBuilder, pattern: &str) -> Result<(), ScanError> {
    builder
        .add_line(None, pattern)
        .map(|_| ())
        .map_err(|e| ScanError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}
