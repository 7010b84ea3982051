use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ui::{KeyMap, ThemeName, DEFAULT_MAX_WIDTH};

pub const APP_NAME: &str = "schemascope";
pub const DEFAULT_TITLE: &str = "Schema Inspector";
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// UI settings read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub max_width: u16,
    pub tick_rate_ms: u64,
    pub theme: ThemeName,
    pub keys: KeyMap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            max_width: DEFAULT_MAX_WIDTH,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            theme: ThemeName::default(),
            keys: KeyMap::default(),
        }
    }
}

impl Config {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join("config.toml")
    }

    /// Load settings from `path`, or from the default location when `path`
    /// is `None`. A missing default file yields the defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };
        if !explicit && !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.max_width == 0 {
            anyhow::bail!("max_width must be positive");
        }
        if config.tick_rate_ms == 0 {
            anyhow::bail!("tick_rate_ms must be positive");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::KeyBinding;

    #[test]
    fn test_empty_settings_are_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_settings() {
        let config = Config::parse(
            r#"
title = "Shop DB"
max_width = 180
theme = "light"

[keys]
quit = ["ctrl+q"]
"#,
        )
        .unwrap();
        assert_eq!(config.title, "Shop DB");
        assert_eq!(config.max_width, 180);
        assert_eq!(config.theme, ThemeName::Light);
        assert_eq!(config.tick_rate_ms, DEFAULT_TICK_RATE_MS);
        assert_eq!(config.keys.quit, vec![KeyBinding::parse("ctrl+q").unwrap()]);
        assert_eq!(config.keys.up, KeyMap::default().up);
    }

    #[test]
    fn test_rejects_zero_width() {
        assert!(Config::parse("max_width = 0").is_err());
    }

    #[test]
    fn test_rejects_bad_key() {
        assert!(Config::parse("[keys]\nup = [\"hyper+x\"]").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = std::env::temp_dir().join("schemascope_no_such_settings.toml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
