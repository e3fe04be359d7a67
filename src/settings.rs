//! Display preferences
//!
//! Persisted separately from the high score, as one JSON blob.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Triangle fan segments per particle circle
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 6,
            QualityPreset::Medium => 10,
            QualityPreset::High => 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub quality: QualityPreset,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            show_fps: false,
        }
    }
}

impl Settings {
    pub const STORAGE_KEY: &'static str = "flappy_kiro_settings";

    /// Load from `store`, falling back to defaults on any failure
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_segments_increase_with_quality() {
        assert!(QualityPreset::Low.circle_segments() < QualityPreset::Medium.circle_segments());
        assert!(QualityPreset::Medium.circle_segments() < QualityPreset::High.circle_segments());
        assert!(QualityPreset::Low.circle_segments() >= 3);
    }

    #[test]
    fn test_load_stored_preferences() {
        let store = MemoryStore::with_entry(
            Settings::STORAGE_KEY,
            r#"{"quality":"High","show_fps":true}"#,
        );
        let expected = Settings {
            quality: QualityPreset::High,
            show_fps: true,
        };
        assert_eq!(Settings::load(&store), expected);
    }

    #[test]
    fn test_partial_blob_keeps_defaults() {
        let store = MemoryStore::with_entry(Settings::STORAGE_KEY, r#"{"show_fps":true}"#);
        let settings = Settings::load(&store);
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert!(settings.show_fps);
    }

    #[test]
    fn test_missing_or_malformed_falls_back() {
        assert_eq!(Settings::load(&MemoryStore::new()), Settings::default());
        let store = MemoryStore::with_entry(Settings::STORAGE_KEY, "{{");
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
