//! Shared helpers for retrofit-analysis integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use retrofit_analysis::RuleCatalog;

/// Root of the React fixtures, found by walking up from the crate.
pub fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);
    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures").join("react")
}

pub fn fixture_path(relative: &str) -> PathBuf {
    fixtures_root().join(relative)
}

pub fn read_fixture(relative: &str) -> String {
    let path = fixture_path(relative);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Copy the named fixtures into `dir`, keeping their relative paths.
pub fn copy_fixtures(dir: &Path, relatives: &[&str]) -> Vec<PathBuf> {
    relatives
        .iter()
        .map(|relative| {
            let target = dir.join(relative);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::copy(fixture_path(relative), &target).unwrap();
            target
        })
        .collect()
}

pub fn catalog() -> RuleCatalog {
    RuleCatalog::load_default().unwrap()
}
