//! Pattern expansion: `~/app/src/**/*.{tsx,jsx}` → sorted file list.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use retrofit_core::config::retrofit_config::home_dir;
use retrofit_core::config::ScanConfig;
use retrofit_core::errors::ScanError;

use super::ignores::IgnorePatterns;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Files matched by one pattern, in deterministic order.
#[derive(Debug, Default)]
pub struct Discovery {
    pub pattern: String,
    /// Literal directory the walk started from.
    pub base: PathBuf,
    pub files: Vec<PathBuf>,
    /// Entries that could not be read or exceeded the size limit.
    pub skipped: Vec<ScanError>,
}

impl Discovery {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

/// Expand `pattern` into the files it names.
///
/// A pattern without glob metacharacters names either one file or a
/// directory (every file with a configured extension beneath it). Zero
/// matches is not an error; only a malformed glob is.
pub fn discover(pattern: &str, config: &ScanConfig) -> Result<Discovery, ScanError> {
    let expanded = expand_home(pattern, home_dir().as_deref());
    let (base, glob) = split_pattern(&expanded);

    let mut discovery = Discovery {
        pattern: pattern.to_string(),
        base: base.clone(),
        ..Default::default()
    };

    match glob {
        Some(glob) => {
            let matcher = compile_glob(&glob)?;
            if base.is_dir() {
                walk(&base, config, |rel| matcher.is_match(rel), &mut discovery)?;
            }
        }
        None if base.is_file() => discovery.files.push(base.clone()),
        None if base.is_dir() => {
            let extensions = config.effective_extensions();
            let has_extension = |rel: &Path| {
                rel.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| extensions.iter().any(|x| x == e))
            };
            walk(&base, config, has_extension, &mut discovery)?;
        }
        None => {}
    }

    discovery.files.sort();
    if discovery.is_empty() {
        tracing::info!(pattern, "no files matched");
    } else {
        tracing::debug!(pattern, files = discovery.len(), "files discovered");
    }
    Ok(discovery)
}

/// Replace a leading `~` with the home directory.
pub fn expand_home(pattern: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return pattern.to_string();
    };
    if pattern == "~" {
        home.display().to_string()
    } else if let Some(rest) = pattern.strip_prefix("~/") {
        home.join(rest).display().to_string()
    } else {
        pattern.to_string()
    }
}

/// Split at the first path component containing a glob metacharacter.
pub fn split_pattern(pattern: &str) -> (PathBuf, Option<String>) {
    let components: Vec<&str> = pattern.split('/').collect();
    let Some(first_glob) = components.iter().position(|c| c.contains(GLOB_META)) else {
        return (PathBuf::from(pattern), None);
    };

    let literal = components[..first_glob].join("/");
    let base = if literal.is_empty() {
        if pattern.starts_with('/') {
            PathBuf::from("/")
        } else {
            PathBuf::from(".")
        }
    } else {
        PathBuf::from(literal)
    };
    (base, Some(components[first_glob..].join("/")))
}

fn compile_glob(glob: &str) -> Result<GlobMatcher, ScanError> {
    GlobBuilder::new(glob)
        .literal_separator(true)
        .build()
        .map(|g| g.compile_matcher())
        .map_err(|e| ScanError::InvalidPattern {
            pattern: glob.to_string(),
            message: e.to_string(),
        })
}

fn walk(
    base: &Path,
    config: &ScanConfig,
    accept: impl Fn(&Path) -> bool,
    discovery: &mut Discovery,
) -> Result<(), ScanError> {
    let ignores = IgnorePatterns::new(base, &config.extra_ignore)?;
    let respect_gitignore = config.effective_respect_gitignore();
    let max_size = config.effective_max_file_size();

    let root = base.to_path_buf();
    let mut builder = WalkBuilder::new(base);
    builder
        .hidden(false)
        .ignore(false)
        .git_global(false)
        .git_ignore(respect_gitignore)
        .git_exclude(respect_gitignore)
        .parents(respect_gitignore)
        .require_git(false)
        .filter_entry(move |entry| {
            let rel = entry.path().strip_prefix(&root).unwrap_or(entry.path());
            if rel.as_os_str().is_empty() {
                return true;
            }
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !ignores.is_ignored(rel, is_dir)
        });

    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(error = %message, "walk error");
                discovery.skipped.push(ScanError::IoError {
                    path: base.to_path_buf(),
                    source: err
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other(message)),
                });
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        let rel = path.strip_prefix(base).unwrap_or(path);
        if !accept(rel) {
            continue;
        }

        match entry.metadata() {
            Ok(meta) if meta.len() > max_size => {
                tracing::debug!(path = %path.display(), size = meta.len(), "skipping oversized file");
                discovery.skipped.push(ScanError::MaxFileSizeExceeded {
                    path: path.to_path_buf(),
                    size: meta.len(),
                    max: max_size,
                });
            }
            Ok(_) => discovery.files.push(path.to_path_buf()),
            Err(err) => {
                let message = err.to_string();
                discovery.skipped.push(ScanError::IoError {
                    path: path.to_path_buf(),
                    source: err
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other(message)),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("components")).unwrap();
        fs::create_dir_all(src.join("node_modules/pkg")).unwrap();
        fs::write(src.join("App.tsx"), "export const App = () => null;").unwrap();
        fs::write(src.join("components/Legacy.jsx"), "class Legacy {}").unwrap();
        fs::write(src.join("util.js"), "export {}").unwrap();
        fs::write(src.join("README.md"), "# docs").unwrap();
        fs::write(src.join("node_modules/pkg/index.js"), "module.exports = 1").unwrap();
        dir
    }

    #[test]
    fn split_pattern_finds_literal_base() {
        assert_eq!(
            split_pattern("./src/**/*.{tsx,jsx}"),
            (PathBuf::from("./src"), Some("**/*.{tsx,jsx}".to_string()))
        );
        assert_eq!(split_pattern("/abs/*.ts"), (PathBuf::from("/abs"), Some("*.ts".to_string())));
        assert_eq!(split_pattern("*.ts"), (PathBuf::from("."), Some("*.ts".to_string())));
        assert_eq!(split_pattern("src/App.tsx"), (PathBuf::from("src/App.tsx"), None));
    }

    #[test]
    fn expand_home_only_touches_leading_tilde() {
        let home = Path::new("/home/dev");
        assert_eq!(expand_home("~/app/src", Some(home)), "/home/dev/app/src");
        assert_eq!(expand_home("~", Some(home)), "/home/dev");
        assert_eq!(expand_home("src/~/x", Some(home)), "src/~/x");
        assert_eq!(expand_home("~/app", None), "~/app");
    }

    #[test]
    fn glob_with_alternation_skips_ignored_dirs() {
        let dir = project();
        let pattern = format!("{}/src/**/*.{{tsx,jsx,js}}", dir.path().display());
        let found = discover(&pattern, &ScanConfig::default()).unwrap();

        let names: Vec<_> = found
            .files
            .iter()
            .map(|p| p.strip_prefix(dir.path().join("src")).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("App.tsx"),
                PathBuf::from("components/Legacy.jsx"),
                PathBuf::from("util.js"),
            ]
        );
    }

    #[test]
    fn single_star_does_not_cross_directories() {
        let dir = project();
        let pattern = format!("{}/src/*.jsx", dir.path().display());
        let found = discover(&pattern, &ScanConfig::default()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn bare_directory_uses_configured_extensions() {
        let dir = project();
        let pattern = dir.path().join("src").display().to_string();
        let found = discover(&pattern, &ScanConfig::default()).unwrap();
        assert_eq!(found.len(), 3);
        assert!(found.files.iter().all(|p| p.extension().unwrap() != "md"));
    }

    #[test]
    fn single_file_pattern() {
        let dir = project();
        let file = dir.path().join("src/README.md");
        let found = discover(&file.display().to_string(), &ScanConfig::default()).unwrap();
        assert_eq!(found.files, vec![file]);
    }

    #[test]
    fn zero_matches_is_not_an_error() {
        let dir = project();
        let pattern = format!("{}/nowhere/**/*.tsx", dir.path().display());
        let found = discover(&pattern, &ScanConfig::default()).unwrap();
        assert!(found.is_empty());
        assert!(found.skipped.is_empty());
    }

    #[test]
    fn invalid_glob_is_rejected() {
        let dir = project();
        let pattern = format!("{}/src/**/[.tsx", dir.path().display());
        let err = discover(&pattern, &ScanConfig::default()).unwrap_err();
        assert!(matches!(err, ScanError::InvalidPattern { .. }));
    }

    #[test]
    fn oversized_files_are_skipped_and_recorded() {
        let dir = project();
        fs::write(dir.path().join("src/Big.tsx"), "x".repeat(64)).unwrap();
        let config = ScanConfig {
            max_file_size: Some(40),
            ..Default::default()
        };
        let pattern = format!("{}/src/*.tsx", dir.path().display());
        let found = discover(&pattern, &config).unwrap();

        assert_eq!(found.len(), 1);
        assert!(found.files[0].ends_with("App.tsx"));
        assert!(matches!(
            found.skipped.as_slice(),
            [ScanError::MaxFileSizeExceeded { size: 64, max: 40, .. }]
        ));
    }

    #[test]
    fn extra_ignore_lines_apply() {
        let dir = project();
        let config = ScanConfig {
            extra_ignore: vec!["components/".to_string()],
            ..Default::default()
        };
        let pattern = format!("{}/src/**/*.jsx", dir.path().display());
        let found = discover(&pattern, &config).unwrap();
        assert!(found.is_empty());
    }
}
