use std::path::{Path, PathBuf};

use playground_engine::ExtractionSettings;
use url::Url;

/// Used when `RECIPE_API_ROOT` is not set at build time.
pub const DEFAULT_API_ROOT: &str = "http://localhost:8080";

const BUILD_API_ROOT: Option<&str> = option_env!("RECIPE_API_ROOT");
const STATE_DIRNAME: &str = ".recipe_playground";
const LOG_FILENAME: &str = "playground.log";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("api root `{value}` is not a valid url: {source}")]
    InvalidApiRoot {
        value: String,
        source: url::ParseError,
    },
    #[error("api root `{0}` must be an http(s) url")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone)]
pub struct PlaygroundConfig {
    pub extraction: ExtractionSettings,
    /// Directory holding the persisted credential.
    pub state_dir: PathBuf,
    pub log_file: PathBuf,
}

impl PlaygroundConfig {
    /// Configuration baked in at compile time, rooted at the working directory.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(BUILD_API_ROOT.unwrap_or(DEFAULT_API_ROOT), &base_dir)
    }

    pub fn new(api_root: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let api_root = api_root.trim();
        let parsed = Url::parse(api_root).map_err(|source| ConfigError::InvalidApiRoot {
            value: api_root.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(api_root.to_string()));
        }

        Ok(Self {
            extraction: ExtractionSettings::new(parsed),
            state_dir: base_dir.join(STATE_DIRNAME),
            log_file: base_dir.join(LOG_FILENAME),
        })
    }
}
