//! Configuration management for meshmapper
//!
//! Handles loading, saving, and default configuration values.
//! Config file location: ~/.config/meshmapper/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const MIN_GRID_COLUMNS: u16 = 1;
pub const MAX_GRID_COLUMNS: u16 = 7;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeName,
    /// Browser command; `{url}` is replaced, otherwise the URL is appended
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    pub grid_columns: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeName::GithubDark,
            browser: None,
            grid_columns: 3,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("meshmapper");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config from {:?}", path))
    }

    fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.grid_columns = config.grid_columns.clamp(MIN_GRID_COLUMNS, MAX_GRID_COLUMNS);
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }
}

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    #[default]
    GithubDark,
    Nord,
    Transparent,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::GithubDark => "GitHub Dark",
            ThemeName::Nord => "Nord",
            ThemeName::Transparent => "Transparent",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::GithubDark => ThemeName::Nord,
            ThemeName::Nord => ThemeName::Transparent,
            ThemeName::Transparent => ThemeName::GithubDark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeName::GithubDark);
        assert_eq!(config.grid_columns, 3);
        assert!(config.browser.is_none());
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::parse("theme = \"nord\"\n").unwrap();
        assert_eq!(config.theme, ThemeName::Nord);
        assert_eq!(config.grid_columns, 3);
    }

    #[test]
    fn test_parse_clamps_columns() {
        let config = Config::parse("grid_columns = 0\nbrowser = \"firefox\"\n").unwrap();
        assert_eq!(config.grid_columns, MIN_GRID_COLUMNS);
        assert_eq!(config.browser.as_deref(), Some("firefox"));

        let config = Config::parse("grid_columns = 40\n").unwrap();
        assert_eq!(config.grid_columns, MAX_GRID_COLUMNS);
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = Config {
            theme: ThemeName::Transparent,
            browser: Some("chromium --app={url}".into()),
            grid_columns: 2,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::parse(&text).unwrap(), config);
    }

    #[test]
    fn test_theme_cycle() {
        let theme = ThemeName::GithubDark;
        assert_eq!(theme.next(), ThemeName::Nord);
        assert_eq!(theme.next().next(), ThemeName::Transparent);
        assert_eq!(theme.next().next().next(), ThemeName::GithubDark);
    }
}
