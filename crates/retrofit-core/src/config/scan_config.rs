//! Discovery configuration.

use serde::{Deserialize, Serialize};

/// File extensions scanned when a pattern names a bare directory.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Configuration for file discovery.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum file size in bytes. Default: 1 MiB.
    pub max_file_size: Option<u64>,
    /// Additional gitignore-style lines excluded from discovery.
    #[serde(default)]
    pub extra_ignore: Vec<String>,
    /// Extensions considered source files. Default: TS/JS family.
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Honour `.gitignore` files while walking. Default: true.
    pub respect_gitignore: Option<bool>,
}

impl ScanConfig {
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(1024 * 1024)
    }

    pub fn effective_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
        } else {
            self.extensions.clone()
        }
    }

    pub fn effective_respect_gitignore(&self) -> bool {
        self.respect_gitignore.unwrap_or(true)
    }
}
