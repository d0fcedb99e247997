use std::time::Duration;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 700;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:9000/api";
pub const DEFAULT_TOKEN_ENV: &str = "POKE_REPLAY_TOKEN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaySettings {
    /// Delay between two revealed log lines in milliseconds (100-5000)
    pub tick_interval_ms: u64,
    /// Base URL of the battle service
    pub api_base_url: String,
    /// Environment variable holding the bearer token, if any
    pub auth_token_env: Option<String>,
    /// Default tracing filter when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_token_env: Some(DEFAULT_TOKEN_ENV.to_string()),
            log_filter: "info".to_string(),
        }
    }
}

impl ReplaySettings {
    /// Clamps tick interval to valid range (100-5000 ms)
    pub fn set_tick_interval_ms(&mut self, interval_ms: u64) {
        self.tick_interval_ms = interval_ms.clamp(100, 5000);
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.clamp(100, 5000))
    }
}
