use serde::{Deserialize, Serialize};

/// Reply memo configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Memoize successful replies by exact request.
    /// TOML: `cache.enabled`. Default: `true`.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Upper bound on memoized replies. Unset keeps every reply until cleared.
    /// TOML: `cache.max_capacity`.
    #[serde(default)]
    pub max_capacity: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_capacity: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}
