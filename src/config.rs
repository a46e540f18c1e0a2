//! FishID configuration.
//!
//! Loaded from `~/.fishid/config.toml`. A missing file means defaults:
//!
//! ```toml
//! api-key = "..."
//! model = "gemini-2.5-flash-lite"
//! language = "en"
//! timeout-secs = 30
//!
//! [default-location]
//! lat = 19.076
//! lng = 72.8777
//! ```
//!
//! The assistant credential is resolved through a chain:
//!
//! 1. `--api-key <key>`: explicit per-command override
//! 2. `FISHID_API_KEY` env var
//! 3. `api-key` in the config file

use std::{env, fs, io, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::Location;

pub const API_KEY_ENV: &str = "FISHID_API_KEY";

const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("unsupported language '{0}' (expected one of: en, hi, mr, ta, te, bn, ml)")]
    Language(String),
}

/// FishID configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Credential for the generative-AI service.
    pub api_key: Option<String>,

    /// Model name passed to the generative-AI service.
    pub model: String,

    /// Language code the chat assistant replies in.
    pub language: String,

    /// Used when no location is given on the command line.
    pub default_location: Option<Location>,

    /// Per-request timeout for external services.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            language: "en".to_string(),
            default_location: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load config from `~/.fishid/config.toml`, or defaults if it doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if language_name(&config.language).is_none() {
            return Err(ConfigError::Language(config.language));
        }

        Ok(config)
    }

    /// The config file path: `~/.fishid/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".fishid").join("config.toml"))
    }

    /// Resolve the assistant credential from the tiered chain.
    ///
    /// Returns `None` when no source yields a non-empty key; callers
    /// surface that as a missing-credential failure rather than aborting.
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> Option<String> {
        resolve_api_key(explicit, env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }
}

fn resolve_api_key(
    explicit: Option<&str>,
    from_env: Option<String>,
    from_file: Option<&str>,
) -> Option<String> {
    // 1. Explicit --api-key flag.
    if let Some(key) = explicit.filter(|k| !k.is_empty()) {
        return Some(key.to_string());
    }

    // 2. FISHID_API_KEY environment variable.
    if let Some(key) = from_env.filter(|k| !k.is_empty()) {
        return Some(key);
    }

    // 3. Config file.
    from_file.filter(|k| !k.is_empty()).map(String::from)
}

/// Display name of a supported language code, used in assistant prompts.
pub fn language_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "en" => "English",
        "hi" => "Hindi",
        "mr" => "Marathi",
        "ta" => "Tamil",
        "te" => "Telugu",
        "bn" => "Bengali",
        "ml" => "Malayalam",
        _ => return None,
    };
    Some(name)
}
