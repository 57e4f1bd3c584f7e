use crate::icons::IconTheme;
use crate::paths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const MIN_POLL_INTERVAL_MS: u64 = 250;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WatcherConfig {
    pub service_name: String,
    pub display_name: String,
    /// Talk to the user's service manager (`systemctl --user`).
    pub user_unit: bool,
    pub web_url: String,
    pub poll_interval_ms: u64,
    pub icons: IconTheme,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            service_name: "plexmediaserver.service".to_string(),
            display_name: "Plex".to_string(),
            user_unit: false,
            web_url: "http://localhost:32400/web".to_string(),
            poll_interval_ms: 3000,
            icons: IconTheme::default(),
        }
    }
}

impl WatcherConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        let loaded = paths::config_path().and_then(|path| Self::load(&path));
        match loaded {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Using default config: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}
