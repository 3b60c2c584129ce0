use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantConfig {
    /// Offer suggested search queries and a search link when claim verification fails.
    /// TOML: `assistant.search_fallback`. Default: `true`.
    #[serde(default = "default_search_fallback")]
    pub search_fallback: bool,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            search_fallback: default_search_fallback(),
        }
    }
}

fn default_search_fallback() -> bool {
    true
}
