//! Application configuration.
//!
//! A small JSON config stored under the platform config directory. Everything
//! has a sensible default so a missing or unreadable file is never fatal.

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Override for where workspace blobs (projects, users, activity) live.
    /// Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Seed demo users and a demo project into an empty workspace on startup.
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    /// Load the config file, falling back to defaults if it is missing or
    /// unreadable. A corrupt config is logged, not fatal.
    pub fn load() -> Self {
        let Ok(path) = config_file_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring corrupt config {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Persist the config as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let path = config_file_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write config {}", path.display()))
    }

    /// Effective directory for workspace storage.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir().context("Failed to determine data directory")?;
        Ok(base.join("datacollab"))
    }
}

fn config_file_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Failed to determine config directory")?;
    Ok(base.join("datacollab").join("config.json"))
}
