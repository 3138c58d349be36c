// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::profile::LabelStyle;
use crate::profile_tool::DEFAULT_PROGRAM;

/// Icon used for every profile when the theme lacks the symbolic profile icons
pub const FALLBACK_ICON: &str = "indicator-messages";

/// User settings, read from `~/.config/powerprofile-tray/config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub poll_interval_secs: u64,
    pub label_style: LabelStyle,
    pub profile_tool: String,
    /// Overrides `$XDG_CACHE_HOME` / `~/.cache`
    pub cache_dir: Option<PathBuf>,
    pub icon_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            poll_interval_secs: 1,
            label_style: LabelStyle::Prefix,
            profile_tool: DEFAULT_PROGRAM.to_string(),
            cache_dir: None,
            icon_name: FALLBACK_ICON.to_string(),
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when the file is missing or
    /// broken. A bad config file never keeps the tray from starting.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!("ignoring config: {:#}", e);
                Settings::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(Some(settings))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Directory holding the flag files
    pub fn resolve_cache_dir(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => cache_dir(),
        }
    }
}

pub fn cache_dir() -> Result<PathBuf> {
    dirs::cache_dir().context("Cannot determine the user cache directory")
}

pub fn config_file() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("Cannot determine the user config directory")?;
    Ok(dir.join("powerprofile-tray/config.json"))
}

/// Directories searched for icon themes, most specific first
pub fn data_dirs() -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = dirs::data_dir().into_iter().collect();
    let system = std::env::var("XDG_DATA_DIRS")
        .ok()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "/usr/local/share:/usr/share".to_string());
    found.extend(
        system
            .split(':')
            .filter(|d| !d.is_empty())
            .map(PathBuf::from),
    );
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        assert!(Settings::load(&path).unwrap().is_none());
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "poll_interval_secs": 5, "label_style": "glyph", "cache_dir": "/tmp/pp" }"#,
        )
        .unwrap();

        let settings = Settings::load_or_default(&path);
        assert_eq!(settings.poll_interval(), Duration::from_secs(5));
        assert_eq!(settings.label_style, LabelStyle::Glyph);
        assert_eq!(settings.profile_tool, "powerprofilesctl");
        assert_eq!(settings.resolve_cache_dir().unwrap(), PathBuf::from("/tmp/pp"));
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(Settings::load(&path).is_err());
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn test_default_cache_dir_is_user_cache() {
        let settings = Settings::default();
        match dirs::cache_dir() {
            Some(expected) => assert_eq!(settings.resolve_cache_dir().unwrap(), expected),
            None => assert!(settings.resolve_cache_dir().is_err()),
        }
        if let Some(config) = dirs::config_dir() {
            assert_eq!(
                config_file().unwrap(),
                config.join("powerprofile-tray/config.json")
            );
        }
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let settings = Settings {
            poll_interval_secs: 0,
            ..Settings::default()
        };
        assert_eq!(settings.poll_interval(), Duration::from_secs(1));
    }
}
