//! Console configuration
//!
//! Loaded once at startup from `~/.config/opdeck/config.toml`. Every field
//! has a default, and a missing or malformed file falls back to defaults
//! with a warning rather than refusing to start.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub device: DeviceSettings,
    pub network: NetworkSettings,
    pub scripts: ScriptSettings,
}

/// Device-side behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeviceSettings {
    /// Parameter store root. The on-device default is `/data/params/d`.
    pub params_dir: Option<PathBuf>,
    /// Delay before the soft-restart flag is written, in milliseconds.
    pub soft_restart_delay_ms: u64,
    /// Delay before rebooting after a maintenance script, in milliseconds.
    pub reboot_delay_ms: u64,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            params_dir: None,
            soft_restart_delay_ms: 1000,
            reboot_delay_ms: 1000,
        }
    }
}

/// Remote key fetch behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkSettings {
    /// Host serving `/<username>.keys`.
    pub key_host: String,
    /// Timeout for the key fetch, in milliseconds.
    pub fetch_timeout_ms: u64,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            key_host: "https://github.com".to_string(),
            fetch_timeout_ms: 10_000,
        }
    }
}

/// Maintenance shell commands. These mirror the on-device scripts and are
/// configurable mainly so tests and desktop runs can stub them out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScriptSettings {
    pub extra_features: String,
    pub git_pull: String,
    pub clear_driving_logs: String,
    pub panda_flash: String,
    pub panda_recover: String,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            extra_features: "/data/openpilot/scripts/extra_features.sh".to_string(),
            git_pull: "sh /data/openpilot/scripts/gitpull.sh".to_string(),
            clear_driving_logs: "rm -rf /sdcard/realdata/*".to_string(),
            panda_flash: "sh /data/openpilot/panda/board/flash.sh".to_string(),
            panda_recover: "sh /data/openpilot/panda/board/recover.sh".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default location.
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`, falling back to defaults on any failure.
    pub fn load_from(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "malformed config, using defaults");
                Self::default()
            }
        }
    }
}

/// Default config file path (`~/.config/opdeck/config.toml`).
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("opdeck").join("config.toml"))
}
