use serde::{Deserialize, Serialize};

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug").
    /// `RUST_LOG` takes precedence when set.
    /// TOML: `basic.loglevel`. Default: `warn`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            loglevel: default_loglevel(),
        }
    }
}

/// Logs go to stderr; keep them quiet unless asked so replies stay readable.
fn default_loglevel() -> String {
    "warn".to_string()
}
