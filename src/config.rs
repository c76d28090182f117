// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Client configuration
//!
//! Settings come from a TOML file (or JSON, by extension) and are then
//! overridden by command-line flags. A missing file is not an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::DEFAULT_CACHE_FILE;
use crate::error::{Result, SectorError};
use crate::navigator::DisplayPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_API_URL: &str = "https://mypagesapi.sectoralarm.net";
pub const DEFAULT_API_VERSION: &str = "5";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Log level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    #[default]
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Filter string understood by `env_logger`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Client configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub email: String,
    pub password: String,
    pub panel_id: String,
    /// Needed for unlock and disarm; prompted for when absent.
    pub panel_code: Option<String>,
    pub api_url: String,
    pub api_version: String,
    /// Per-request deadline.
    pub timeout_secs: u64,
    pub cache_path: PathBuf,
    pub log_level: LogLevel,
    /// Categories navigated over live data instead of the cached skeleton.
    ///
    /// Their menus come from one fetch and the chosen entry from the next, so
    /// an entry inserted in between shifts indices; the console flags a
    /// resolved entry whose label no longer matches the one picked.
    pub live_categories: Vec<String>,
    pub display: DisplayPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            panel_id: String::new(),
            panel_code: None,
            api_url: DEFAULT_API_URL.into(),
            api_version: DEFAULT_API_VERSION.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            log_level: LogLevel::Error,
            live_categories: vec!["Logs".into()],
            display: DisplayPolicy::default(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("panel_id", &self.panel_id)
            .field("panel_code", &self.panel_code.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .field("cache_path", &self.cache_path)
            .field("log_level", &self.log_level)
            .field("live_categories", &self.live_categories)
            .field("display", &self.display)
            .finish()
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub email: Option<String>,
    pub password: Option<String>,
    pub panel_id: Option<String>,
    pub panel_code: Option<String>,
    pub cache_path: Option<PathBuf>,
}

impl Config {
    /// Load from `path`, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| SectorError::Configuration(format!("Cannot read {}: {}", path.display(), e)))?;
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    /// Parse from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SectorError::Configuration(format!("TOML parse error: {}", e)))
    }

    /// Parse from JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| SectorError::Configuration(format!("JSON parse error: {}", e)))
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(email) = overrides.email {
            self.email = email;
        }
        if let Some(password) = overrides.password {
            self.password = password;
        }
        if let Some(panel_id) = overrides.panel_id {
            self.panel_id = panel_id;
        }
        if let Some(panel_code) = overrides.panel_code {
            self.panel_code = Some(panel_code);
        }
        if let Some(cache_path) = overrides.cache_path {
            self.cache_path = cache_path;
        }
    }

    /// Check that credentials and the panel are set.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("email", &self.email),
            ("password", &self.password),
            ("panel_id", &self.panel_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SectorError::Configuration(format!(
                "missing required configuration parameters: {}",
                missing.join(", ")
            )))
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Panel code, ignoring an empty string.
    pub fn panel_code(&self) -> Option<&str> {
        self.panel_code.as_deref().filter(|code| !code.is_empty())
    }

    pub fn is_live_category(&self, category: &str) -> bool {
        self.live_categories.iter().any(|name| name == category)
    }

    /// Generate sample config
    pub fn sample_toml() -> String {
        r#"# Sector Console Configuration
email = "user@example.com"
password = "secret"
panel_id = "01234567"
# Needed to unlock doors and disarm; asked for interactively when omitted
# panel_code = "1234"

api_url = "https://mypagesapi.sectoralarm.net"
api_version = "5"
timeout_secs = 30
cache_path = "cache.json"
log_level = "Error"

# Navigated over live data rather than the cached skeleton
live_categories = ["Logs"]

[display]
# List entries newest first, labelled by their Time field
chronological = true
"#
        .into()
    }
}
