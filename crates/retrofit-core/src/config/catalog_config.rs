//! Rule catalog location.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to a replacement `deprecated-apis.json`. The embedded catalog is used when unset.
    pub path: Option<String>,
}
