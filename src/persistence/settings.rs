use crate::domain::{SortOption, StatusFilter};
use crate::error::StoreError;
use crate::persistence::{atomic_write, read_file};
use crate::ticker::DEFAULT_TICK_MS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User preferences stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub sort: SortOption,
    #[serde(default)]
    pub status_filter: StatusFilter,
    /// Display refresh interval for running timers
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_use_emoji")]
    pub use_emoji: bool,
}

fn default_tick_ms() -> u64 {
    DEFAULT_TICK_MS
}

fn default_use_emoji() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sort: SortOption::default(),
            status_filter: StatusFilter::default(),
            tick_ms: DEFAULT_TICK_MS,
            use_emoji: true,
        }
    }
}

/// Load settings; a missing file yields defaults
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, StoreError> {
    let path = path.as_ref();
    let Some(content) = read_file(path)? else {
        return Ok(Settings::default());
    };

    let mut settings: Settings = serde_json::from_str(&content).map_err(|e| StoreError::json(path, e))?;
    if settings.tick_ms == 0 {
        settings.tick_ms = DEFAULT_TICK_MS;
    }
    Ok(settings)
}

pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<(), StoreError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(settings).map_err(|e| StoreError::json(path, e))?;
    atomic_write(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = tempdir().unwrap();
        let settings = load_settings(temp_dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.tick_ms, 1000);
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            sort: SortOption::TitleZa,
            status_filter: StatusFilter::Paused,
            tick_ms: 500,
            use_emoji: false,
        };
        save_settings(&path, &settings).unwrap();

        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{\"sort\": \"TITLE_AZ\", \"tick_ms\": 0}").unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.sort, SortOption::TitleAz);
        assert_eq!(settings.status_filter, StatusFilter::All);
        assert_eq!(settings.tick_ms, 1000);
        assert!(settings.use_emoji);
    }
}
