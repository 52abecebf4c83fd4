//! Global configuration loading (`~/.config/gnsync/config.toml`) and XDG paths.

pub mod global;
pub mod paths;

pub use global::{ApiConfig, AuthConfig, GlobalConfig, SyncDefaults, TOKEN_ENV_VAR};
