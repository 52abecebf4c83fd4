//! Global configuration for gnsync (`~/.config/gnsync/config.toml`).
//!
//! Stores user-level settings shared by every synced directory:
//! - The note-store access token (the `GNSYNC_TOKEN` env var wins over the file)
//! - The note-store API endpoint and request timeout
//! - Defaults for the file mask, content format and log file

use anyhow::{Context, Result, bail};
use gnsync_core::ContentFormat;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::paths;

/// Environment variable that overrides `auth.token`.
pub const TOKEN_ENV_VAR: &str = "GNSYNC_TOKEN";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MASK: &str = "*.*";

/// Global configuration loaded from `~/.config/gnsync/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub sync: SyncDefaults,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Access token for the note store.
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Defaults applied when the matching CLI flag is omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncDefaults {
    #[serde(default = "default_mask")]
    pub default_mask: String,
    #[serde(default)]
    pub default_format: ContentFormat,
    #[serde(default)]
    pub log_path: Option<PathBuf>,
}

impl Default for SyncDefaults {
    fn default() -> Self {
        Self {
            default_mask: default_mask(),
            default_format: ContentFormat::default(),
            log_path: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_mask() -> String {
    DEFAULT_MASK.to_string()
}

impl GlobalConfig {
    /// Load global config from `~/.config/gnsync/config.toml`.
    ///
    /// Returns `Default` if the file does not exist or if the config
    /// directory cannot be determined (e.g., no HOME in containers).
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(Self::default()),
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from an explicit file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded gnsync config");
        Ok(config)
    }

    /// Resolve the access token: `GNSYNC_TOKEN` first, then `auth.token`.
    pub fn token(&self) -> Option<String> {
        self.token_with_env(std::env::var(TOKEN_ENV_VAR).ok())
    }

    fn token_with_env(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .or_else(|| self.auth.token.clone())
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }

    /// Log file path: configured override or `{state_dir}/gnsync.log`.
    pub fn log_path(&self) -> PathBuf {
        self.sync
            .log_path
            .clone()
            .unwrap_or_else(paths::default_log_path)
    }

    /// Path to the global config file: `~/.config/gnsync/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        let dir = paths::config_dir().context("Failed to determine config directory")?;
        Ok(dir.join("config.toml"))
    }

    /// Generate default config TOML with comments as a template.
    pub fn default_template() -> String {
        r#"# gnsync global configuration
# Location: ~/.config/gnsync/config.toml

[auth]
# Access token for the note store. GNSYNC_TOKEN overrides this value.
# token = "S=s1:U=..."

[api]
base_url = "http://127.0.0.1:8080/api/v1"
timeout_secs = 30

[sync]
default_mask = "*.*"
default_format = "plain"  # plain | markdown
# log_path = "/home/me/gnsync.log"
"#
        .to_string()
    }

    /// Save the default template to the config path, creating directories as needed.
    /// Returns the path where the file was written.
    pub fn save_default_template() -> Result<PathBuf> {
        let path = Self::config_path()?;
        Self::save_default_template_to(&path)?;
        Ok(path)
    }

    /// Write the default template to `path`. An existing file is never
    /// overwritten.
    pub fn save_default_template_to(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let mut file = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                bail!(
                    "Config already exists at {}; remove it first to regenerate the template",
                    path.display()
                );
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to create global config: {}", path.display())
                });
            }
        };
        file.write_all(Self::default_template().as_bytes())
            .with_context(|| format!("Failed to write global config: {}", path.display()))?;
        Ok(())
    }
}
