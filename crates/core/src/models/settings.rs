use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::CoreError;

use super::aggregate::ElectricityMixMode;

/// Backend used when no other base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://app-backend.electricitymap.org";

/// Grid polling period when none is configured (5 minutes).
pub const DEFAULT_GRID_POLL_INTERVAL_SECS: u64 = 300;

/// User/embedding-app settings for the map core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the backend API, without trailing slash.
    pub api_base_url: String,

    /// Sent as `electricitymap-token` when present.
    pub api_token: Option<String>,

    /// Seconds between two grid polls.
    pub grid_poll_interval_secs: u64,

    /// Mode used by the facade's exchange and chart accessors.
    pub electricity_mix_mode: ElectricityMixMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: None,
            grid_poll_interval_secs: DEFAULT_GRID_POLL_INTERVAL_SECS,
            electricity_mix_mode: ElectricityMixMode::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.api_base_url = settings.api_base_url.trim_end_matches('/').to_string();
        if settings.api_base_url.is_empty() {
            return Err(CoreError::InvalidConfig("api_base_url must not be empty".into()));
        }
        if settings.grid_poll_interval_secs == 0 {
            return Err(CoreError::InvalidConfig(
                "grid_poll_interval_secs must be greater than zero".into(),
            ));
        }
        Ok(settings)
    }

    pub fn grid_poll_interval(&self) -> Duration {
        Duration::from_secs(self.grid_poll_interval_secs)
    }
}
