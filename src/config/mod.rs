mod assistant;
mod basic;
mod cache;
mod gemini;

pub use assistant::AssistantConfig;
pub use basic::BasicConfig;
pub use cache::CacheConfig;
pub use gemini::GeminiConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::VeritasError;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Logging (see `basic` table in veritas.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Upstream API settings (see `gemini` table).
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Reply memo settings (see `cache` table).
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub assistant: AssistantConfig,
}

pub const DEFAULT_CONFIG_FILE: &str = "veritas.toml";
const ENV_PREFIX: &str = "VERITAS_";

impl Config {
    /// Builds a Figment that merges defaults, the TOML file if present, then
    /// `VERITAS_`-prefixed environment variables (`__` separates tables).
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if file.is_file() {
            figment.merge(Toml::file(file))
        } else {
            figment
        };
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads and validates configuration.
    ///
    /// An explicitly named file must exist; the default `veritas.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, VeritasError> {
        if let Some(path) = path.filter(|path| !path.is_file()) {
            return Err(VeritasError::InvalidConfig(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let cfg: Self = Self::figment(path).extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), VeritasError> {
        if self.gemini.candidates().is_err() {
            return Err(VeritasError::InvalidConfig(
                "gemini.model_candidates must name at least one model".to_string(),
            ));
        }
        if !matches!(self.gemini.api_base.scheme(), "http" | "https")
            || self.gemini.api_base.cannot_be_a_base()
        {
            return Err(VeritasError::InvalidConfig(format!(
                "gemini.api_base must be an http(s) URL, got {}",
                self.gemini.api_base
            )));
        }
        if self.cache.max_capacity == Some(0) {
            return Err(VeritasError::InvalidConfig(
                "cache.max_capacity must be greater than zero when set".to_string(),
            ));
        }
        Ok(())
    }
}
