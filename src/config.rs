use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration stored in JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Overlay opacity, 0.0 (off) to 1.0 (opaque)
    pub opacity: f32,
    pub color_r: u8,
    pub color_g: u8,
    pub color_b: u8,
    pub is_visible: bool,
    pub launch_on_login: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            opacity: 0.5,
            color_r: 0,
            color_g: 0,
            color_b: 0,
            is_visible: true,
            launch_on_login: false,
        }
    }
}

pub fn config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("Aura").join("config.json")
}

pub fn load_config() -> AppConfig {
    load_from(&config_path())
}

pub fn save_config(config: &AppConfig) {
    save_to(&config_path(), config);
}

fn load_from(path: &Path) -> AppConfig {
    if path.exists() {
        let data = fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&data).unwrap_or_default()
    } else {
        AppConfig::default()
    }
}

fn save_to(path: &Path, config: &AppConfig) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let data = serde_json::to_string_pretty(config).unwrap_or_default();
    if fs::write(path, data).is_err() {
        tracing::warn!(path = %path.display(), "failed to write config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_from(&dir.path().join("config.json"));
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(load_from(&path), AppConfig::default());
    }

    #[test]
    fn saved_values_load_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let cfg = AppConfig {
            opacity: 0.35,
            color_r: 12,
            color_g: 200,
            color_b: 7,
            is_visible: false,
            launch_on_login: true,
        };
        save_to(&path, &cfg);
        assert_eq!(load_from(&path), cfg);
    }
}
