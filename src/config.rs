use crate::error::ForwardResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Forward key specs through dotool at all
    pub enabled: bool,
    /// Backend client command, program first
    pub dotool_command: Vec<String>,
    /// Warn once per unrecognized key name
    pub log_unknown_keys: bool,
    pub log_level: String,

    /// Extra key name -> backend name entries
    pub key_overrides: HashMap<String, String>,
    /// Specs shown by `keyforward debug`
    pub debug_samples: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            dotool_command: vec!["dotoolc".to_string()],
            log_unknown_keys: true,
            log_level: "INFO".to_string(),
            key_overrides: HashMap::new(),
            debug_samples: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from the default location, or use defaults
    pub fn load() -> ForwardResult<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from `path`.
    ///
    /// A missing file yields defaults. A corrupt file is moved aside to
    /// `*.json.corrupt` and defaults are used.
    pub fn load_from(path: &Path) -> ForwardResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> ForwardResult<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> ForwardResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("keyforward")
        .join("config.json")
}
