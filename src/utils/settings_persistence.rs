use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use crate::models::ReplaySettings;

const SETTINGS_FILE: &str = "replay_settings.json";

pub fn get_settings_file_path() -> PathBuf {
    PathBuf::from(SETTINGS_FILE)
}

pub fn load_replay_settings() -> ReplaySettings {
    load_replay_settings_from(&get_settings_file_path())
}

pub fn load_replay_settings_from(file_path: &Path) -> ReplaySettings {
    if !file_path.exists() {
        info!("No existing settings found, using defaults");
        return ReplaySettings::default();
    }

    match fs::read_to_string(file_path) {
        Ok(content) => match serde_json::from_str::<ReplaySettings>(&content) {
            Ok(mut settings) => {
                settings.set_tick_interval_ms(settings.tick_interval_ms);
                info!(
                    "Loaded settings: tick {}ms, api {}",
                    settings.tick_interval_ms, settings.api_base_url
                );
                settings
            }
            Err(e) => {
                warn!("Error parsing settings JSON: {}. Using defaults.", e);
                ReplaySettings::default()
            }
        },
        Err(e) => {
            warn!("Error reading settings file: {}. Using defaults.", e);
            ReplaySettings::default()
        }
    }
}

pub fn save_replay_settings(settings: &ReplaySettings, file_path: &Path) -> io::Result<()> {
    let json_content = serde_json::to_string_pretty(settings)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("JSON serialization error: {}", e)))?;

    let mut file = fs::File::create(file_path)?;
    file.write_all(json_content.as_bytes())?;
    file.flush()?;

    info!("Saved settings to {}", file_path.display());
    Ok(())
}
