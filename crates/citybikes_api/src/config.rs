use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::map::Coordinate;

/// Application configuration, loaded from an optional JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Base URL of the bike-share API, without the trailing `/networks`
    pub base_url: String,
    /// Timeout applied to every API request, in seconds
    pub request_timeout_secs: u64,
    /// Map center used when the device location is unknown
    pub default_center: Coordinate,
    pub default_zoom: u8,
    /// Zoom used when centering on the device location
    pub located_zoom: u8,
    pub min_zoom: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            base_url: "https://api.citybik.es/v2".to_string(),
            request_timeout_secs: 30,
            default_center: Coordinate {
                latitude: 50.0,
                longitude: 0.0,
            },
            default_zoom: 3,
            located_zoom: 13,
            min_zoom: 3,
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
