//! Application configuration loaded from a TOML file.
//!
//! Every field has a default, so a missing or partial `config.toml` is fine.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::nav::filter::MatchMode;
use crate::service::ListOptions;

/// Top-level application configuration.
///
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(e, path))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Listing options derived from the `[general]` section.
    pub fn list_options(&self) -> ListOptions {
        ListOptions {
            include_hidden: self.general.show_hidden,
            sorted: self.general.sort_dirs_first,
        }
    }

    pub fn double_tap_timeout(&self) -> Duration {
        Duration::from_millis(self.input.double_tap_timeout_ms)
    }
}

/// General file-browsing preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub show_hidden: bool,
    /// Directories first, then case-insensitive by name. When `false`,
    /// entries keep the order the file system returns.
    #[serde(default = "default_true")]
    pub sort_dirs_first: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            sort_dirs_first: true,
        }
    }
}

/// Key input timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// How long a double-tap key (`gg`, `dd`) stays armed after the first press.
    #[serde(default = "default_double_tap_timeout_ms")]
    pub double_tap_timeout_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            double_tap_timeout_ms: default_double_tap_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub mode: MatchMode,
}

/// Display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Marks entries the current user may not enter or open.
    #[serde(default = "default_true")]
    pub show_permission_marker: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_permission_marker: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_double_tap_timeout_ms() -> u64 {
    500
}
