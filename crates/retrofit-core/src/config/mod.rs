//! Configuration system for retrofit.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod catalog_config;
pub mod fix_config;
pub mod retrofit_config;
pub mod scan_config;

pub use catalog_config::CatalogConfig;
pub use fix_config::FixConfig;
pub use retrofit_config::{CliOverrides, RetrofitConfig};
pub use scan_config::ScanConfig;
