//! Configuration management for extsort.
//!
//! This module handles loading and saving configuration from/to TOML files.
//! Configuration covers copy concurrency, the log output (timestamp format,
//! color) and the color theme. On first run, a default configuration is automatically created.

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for extsort.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UIConfig,
    #[serde(default)]
    pub copy: CopyConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Copy operation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    /// Maximum number of copies and folder listings holding files open at once
    pub max_concurrent_copies: usize,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            max_concurrent_copies: 10,
        }
    }
}

/// User interface configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UIConfig {
    #[serde(default)]
    pub color: ColorConfig,
}

/// Color theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Theme name: "default", "cyan", "magenta", "yellow", "green", "red", "blue", "white"
    pub theme: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
        }
    }
}

/// Log line configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// chrono format string for the timestamp prefix
    pub timestamp_format: String,
    /// Style severities with colors
    pub color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            color: true,
        }
    }
}

impl Config {
    /// Returns the configuration directory path.
    ///
    /// Typically `~/.config/extsort` on Unix systems or `%USERPROFILE%/.config/extsort` on Windows.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn get_config_dir() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| color_eyre::eyre::eyre!("Could not determine home directory"))?;

        Ok(PathBuf::from(home).join(".config").join("extsort"))
    }

    fn get_config_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default location, creating it if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if file I/O fails or if the TOML is malformed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use extsort::config::Config;
    ///
    /// # fn main() -> color_eyre::Result<()> {
    /// let config = Config::load()?;
    /// println!("Using theme: {}", config.ui.color.theme);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from a specific file.
    ///
    /// Missing sections and keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .wrap_err_with(|| format!("Malformed config file {}", path.display()))?;

        Ok(config)
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// Saves the configuration to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)
            .wrap_err_with(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.ui.color.theme, "default");
        assert_eq!(config.log.timestamp_format, "%Y-%m-%d %H:%M:%S");
        assert!(config.log.color);
        assert_eq!(config.copy.max_concurrent_copies, 10);
    }

    #[test]
    fn test_copy_config_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[copy]\nmax_concurrent_copies = 64\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.copy.max_concurrent_copies, 64);
        assert_eq!(config.ui.color.theme, "default");
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.ui.color.theme = "magenta".to_string();
        config.log.color = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.ui.color.theme, "magenta");
        assert!(!loaded.log.color);
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui.color]\ntheme = \"blue\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.ui.color.theme, "blue");
        assert_eq!(config.log.timestamp_format, "%Y-%m-%d %H:%M:%S");
    }

    #[test]
    fn test_config_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui.color\ntheme = ").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_config_missing_file() {
        let dir = tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("absent.toml")).is_err());
    }
}
