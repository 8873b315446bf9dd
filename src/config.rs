use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "settings.yaml";

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TIMEOUT_SECONDS: u64 = 90;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to resolve home directory for state root")]
    HomeDirectoryUnavailable,
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to encode settings: {0}")]
    Encode(#[source] serde_yaml::Error),
    #[error("failed to write settings {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProviderSettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub provider: ProviderSettings,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

/// `TRIPSMITH_STATE_ROOT` wins over the default `~/.tripsmith`.
pub fn resolve_state_root() -> Result<PathBuf, ConfigError> {
    if let Some(root) = std::env::var("TRIPSMITH_STATE_ROOT")
        .ok()
        .filter(|v| !v.trim().is_empty())
    {
        return Ok(PathBuf::from(root));
    }
    let home = std::env::var("HOME")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(PathBuf::from(home).join(".tripsmith"))
}

pub fn settings_path(state_root: &Path) -> PathBuf {
    state_root.join(SETTINGS_FILE_NAME)
}

/// Missing file is not an error; defaults apply. `TRIPSMITH_API_BASE`
/// overrides whatever the file says.
pub fn load_settings(state_root: &Path) -> Result<Settings, ConfigError> {
    let path = settings_path(state_root);
    let mut settings = if path.exists() {
        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?
    } else {
        Settings::default()
    };

    if let Some(api_base) = std::env::var("TRIPSMITH_API_BASE")
        .ok()
        .filter(|v| !v.trim().is_empty())
    {
        settings.provider.api_base = api_base;
    }
    if settings.provider.timeout_seconds == 0 {
        return Err(ConfigError::Invalid(
            "provider.timeout_seconds must be at least 1".to_string(),
        ));
    }
    Ok(settings)
}

pub fn save_settings(state_root: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let path = settings_path(state_root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.display().to_string(),
            source,
        })?;
    }
    let encoded = serde_yaml::to_string(settings).map_err(ConfigError::Encode)?;
    write_settings_atomically(&path, encoded.as_bytes()).map_err(|source| ConfigError::Write {
        path: path.display().to_string(),
        source,
    })
}

/// Stage to a sibling temp file, then rename over the target, so a crash
/// mid-write never leaves a torn settings file.
fn write_settings_atomically(path: &Path, encoded: &[u8]) -> std::io::Result<()> {
    let staging = path.with_extension(format!("yaml.tmp.{}", std::process::id()));
    let mut file = fs::File::create(&staging)?;
    file.write_all(encoded)?;
    file.sync_all()?;
    drop(file);
    fs::rename(&staging, path)?;
    #[cfg(unix)]
    if let Some(parent) = path.parent() {
        fs::File::open(parent)?.sync_all()?;
    }
    Ok(())
}

/// The key never lives in the settings file.
pub fn provider_api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|v| !v.trim().is_empty())
}
