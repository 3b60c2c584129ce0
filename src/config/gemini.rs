use serde::{Deserialize, Serialize};
use url::Url;

use crate::dispatch::ModelCandidates;
use crate::error::DispatchError;

/// Gemini API configuration managed by Figment.
///
/// The API key is deliberately absent: it is supplied per process and never stored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// Base URL of the v1beta REST API.
    /// TOML: `gemini.api_base`. Default: `https://generativelanguage.googleapis.com/v1beta/`.
    #[serde(default = "default_api_base")]
    pub api_base: Url,

    /// Model identifiers tried in order until one is found upstream.
    /// TOML: `gemini.model_candidates`.
    #[serde(default = "default_model_candidates")]
    pub model_candidates: Vec<String>,

    /// Optional upstream HTTP proxy. If set, used for the reqwest client.
    /// TOML: `gemini.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Overall per-request timeout. Unset leaves requests unbounded.
    /// TOML: `gemini.request_timeout_secs`.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl GeminiConfig {
    /// Configured candidates normalized by [`ModelCandidates::new`].
    pub fn candidates(&self) -> Result<ModelCandidates, DispatchError> {
        ModelCandidates::new(self.model_candidates.iter().map(String::as_str))
    }

    /// Proxy URL with any `user:pass@` stripped, for logging.
    pub fn redacted_proxy(&self) -> Option<Url> {
        self.proxy.clone().map(|mut url| {
            if !url.username().is_empty() || url.password().is_some() {
                let _ = url.set_username("");
                let _ = url.set_password(None);
            }
            url
        })
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model_candidates: default_model_candidates(),
            proxy: None,
            request_timeout_secs: None,
        }
    }
}

fn default_api_base() -> Url {
    Url::parse("https://generativelanguage.googleapis.com/v1beta/")
        .expect("invalid fixed Gemini API base URL")
}

fn default_model_candidates() -> Vec<String> {
    ["gemini-1.5-flash", "gemini-2.0-flash", "gemini-1.5-flash-latest"]
        .into_iter()
        .map(str::to_string)
        .collect()
}
