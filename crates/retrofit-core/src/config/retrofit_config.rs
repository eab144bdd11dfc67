//! Top-level retrofit configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::fix_config::CONFIDENCE_LEVELS;
use super::{CatalogConfig, FixConfig, ScanConfig};
use crate::errors::ConfigError;

/// Project config file name looked up in the scan root.
pub const PROJECT_CONFIG_FILE: &str = "retrofit.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`RETROFIT_*`)
/// 3. Project config (`retrofit.toml` in the project root)
/// 4. User config (`~/.retrofit/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RetrofitConfig {
    pub scan: ScanConfig,
    pub fix: FixConfig,
    pub catalog: CatalogConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dry_run: Option<bool>,
    pub max_file_size: Option<u64>,
    pub catalog_path: Option<String>,
}

impl RetrofitConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load an explicit config file on top of compiled defaults.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        Self::merge_toml_file(&mut config, path)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &RetrofitConfig) -> Result<(), ConfigError> {
        if config.scan.max_file_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "scan.max_file_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ref level) = config.fix.min_confidence {
            if !CONFIDENCE_LEVELS.contains(&level.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "fix.min_confidence".to_string(),
                    message: format!("must be one of {}", CONFIDENCE_LEVELS.join(", ")),
                });
            }
        }
        if config.scan.extensions.iter().any(|ext| ext.is_empty() || ext.starts_with('.')) {
            return Err(ConfigError::ValidationFailed {
                field: "scan.extensions".to_string(),
                message: "extensions are written without a leading dot".to_string(),
            });
        }
        Ok(())
    }

    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".retrofit").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut RetrofitConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RetrofitConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it sets a value.
    fn merge(base: &mut RetrofitConfig, other: &RetrofitConfig) {
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }
        if !other.scan.extensions.is_empty() {
            base.scan.extensions = other.scan.extensions.clone();
        }
        if other.scan.respect_gitignore.is_some() {
            base.scan.respect_gitignore = other.scan.respect_gitignore;
        }

        if other.fix.dry_run.is_some() {
            base.fix.dry_run = other.fix.dry_run;
        }
        if other.fix.min_confidence.is_some() {
            base.fix.min_confidence = other.fix.min_confidence.clone();
        }

        if other.catalog.path.is_some() {
            base.catalog.path = other.catalog.path.clone();
        }
    }

    /// Pattern: `RETROFIT_SCAN_MAX_FILE_SIZE`, `RETROFIT_FIX_DRY_RUN`, ...
    fn apply_env_overrides(config: &mut RetrofitConfig) {
        if let Ok(val) = std::env::var("RETROFIT_SCAN_MAX_FILE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.max_file_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RETROFIT_FIX_DRY_RUN") {
            if let Ok(v) = val.parse::<bool>() {
                config.fix.dry_run = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RETROFIT_FIX_MIN_CONFIDENCE") {
            config.fix.min_confidence = Some(val);
        }
        if let Ok(val) = std::env::var("RETROFIT_CATALOG_PATH") {
            config.catalog.path = Some(val);
        }
    }

    fn apply_cli_overrides(config: &mut RetrofitConfig, cli: &CliOverrides) {
        if let Some(v) = cli.dry_run {
            config.fix.dry_run = Some(v);
        }
        if let Some(v) = cli.max_file_size {
            config.scan.max_file_size = Some(v);
        }
        if let Some(ref v) = cli.catalog_path {
            config.catalog.path = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
