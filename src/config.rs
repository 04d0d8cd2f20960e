use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SCHEME: &str = "zipic";
pub const DEFAULT_BUNDLE_ID: &str = "studio.5km.zipic";

/// Contents of `~/.config/zipic-mcp/config.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL scheme Zipic registers for deep links.
    pub scheme: String,
    /// Bundle identifier used to check whether Zipic is installed.
    pub bundle_id: String,
    /// Append logs here instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Resolve every setting with priority: ENV > global config > default
    ///
    /// A global config file that exists but cannot be read or parsed is
    /// skipped and returned alongside, so it can be logged once logging is up.
    pub fn load() -> (Self, Option<anyhow::Error>) {
        Self::from_sources(load_global_config(), |key| std::env::var(key).ok())
    }

    fn from_sources(
        file: Result<Option<FileConfig>>,
        env: impl Fn(&str) -> Option<String>,
    ) -> (Self, Option<anyhow::Error>) {
        match file {
            Ok(file) => (Self::resolve(file.unwrap_or_default(), env), None),
            Err(e) => (Self::resolve(FileConfig::default(), env), Some(e)),
        }
    }

    fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        Self {
            scheme: env("ZIPIC_MCP_SCHEME")
                .or(file.scheme)
                .unwrap_or_else(|| DEFAULT_SCHEME.to_string()),
            bundle_id: env("ZIPIC_MCP_BUNDLE_ID")
                .or(file.bundle_id)
                .unwrap_or_else(|| DEFAULT_BUNDLE_ID.to_string()),
            log_file: env("ZIPIC_MCP_LOG_FILE").map(PathBuf::from).or(file.log_file),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(FileConfig::default(), |_| None)
    }
}

/// Path of the global config file, `<config_dir>/zipic-mcp/config.json`.
pub fn global_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Failed to get config directory")?
        .join("zipic-mcp");
    Ok(config_dir.join("config.json"))
}

/// Load the global config file. `None` when there is no file.
pub fn load_global_config() -> Result<Option<FileConfig>> {
    read_config_if_present(&global_config_path()?)
}

pub fn read_config_if_present(path: &Path) -> Result<Option<FileConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    read_config(path).map(Some)
}

pub fn read_config(path: &Path) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let config: FileConfig =
        serde_json::from_str(&contents).context("Failed to parse config")?;
    Ok(config)
}
