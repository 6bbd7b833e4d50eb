use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ui::theme::ThemePreset;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

/// Where the poems are published and how load failures are shown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Site base URL; the manifest is read from `<base_url>/poems/poems.json`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Keep showing the last good manifest when a reload fails
    #[serde(default = "default_true")]
    pub keep_stale_on_error: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            keep_stale_on_error: true,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/".to_string()
}

fn default_true() -> bool {
    true
}

/// Viewer appearance settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Color theme preset
    #[serde(default)]
    pub theme: ThemePreset,
    /// Show poem counts next to tags
    #[serde(default = "default_true")]
    pub show_tag_counts: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            theme: ThemePreset::default(),
            show_tag_counts: true,
        }
    }
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "poemshelf", "Poemshelf")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from the default location, using defaults if it can't be read
    pub fn load_or_default() -> Self {
        Self::config_path()
            .map(|path| Self::load_or_default_from(&path))
            .unwrap_or_else(Self::fallback)
    }

    /// Load configuration from a file, using defaults if it can't be read
    pub fn load_or_default_from(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(Self::fallback)
    }

    fn fallback(e: anyhow::Error) -> Self {
        tracing::error!("Failed to load config, using defaults: {:#}", e);
        Self::default()
    }

    /// Load configuration from a file, falling back to defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.source.base_url, "http://localhost:8080/");
        assert!(config.source.keep_stale_on_error);
        assert_eq!(config.viewer.theme, ThemePreset::Ink);
        assert!(config.viewer.show_tag_counts);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[source]\nbase_url = \"https://example.org/verse/\"\n\n[viewer]\ntheme = \"sepia\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.source.base_url, "https://example.org/verse/");
        assert!(config.source.keep_stale_on_error);
        assert_eq!(config.viewer.theme, ThemePreset::Sepia);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.source.keep_stale_on_error = false;
        config.viewer.theme = ThemePreset::Night;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.source.keep_stale_on_error);
        assert_eq!(loaded.viewer.theme, ThemePreset::Night);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[source\nbase_url = ").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_unreadable_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[source\nbase_url = ").unwrap();

        let config = Config::load_or_default_from(&path);
        assert_eq!(config.source.base_url, "http://localhost:8080/");
        assert!(config.source.keep_stale_on_error);
    }
}
