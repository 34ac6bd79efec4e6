//! User settings stored as settings.json in the app data directory
//!
//! The display theme is deliberately absent: it only lives for the session.

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Backend
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub success_delay_ms: u64,

    // Paths
    pub last_directory: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            success_delay_ms: DEFAULT_SUCCESS_DELAY.as_millis() as u64,
            last_directory: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Apply the endpoint override from the environment, if set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV_VAR) {
            self.apply_endpoint_override(&endpoint);
        }
        self
    }

    fn apply_endpoint_override(&mut self, endpoint: &str) {
        let endpoint = endpoint.trim();
        if !endpoint.is_empty() {
            info!(endpoint, "Endpoint overridden from environment");
            self.endpoint = endpoint.to_string();
        }
    }

    pub fn request_timeout(&self) -> Duration {
        // Zero would make every request fail immediately
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.success_delay_ms)
    }

    pub fn last_directory_or_default(&self) -> PathBuf {
        self.last_directory
            .as_ref()
            .map(PathBuf::from)
            .filter(|p| p.is_dir())
            .or_else(dirs::picture_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
