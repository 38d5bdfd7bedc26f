use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the config directory, mainly for tests
const CONFIG_DIR_ENV: &str = "FOLIO_CONFIG_DIR";

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Site file used when `folio check` gets no path
    pub site: Option<String>,
}

impl Config {
    /// Get the config directory path (~/.config/folio unless overridden)
    pub fn dir() -> Option<PathBuf> {
        if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Some(PathBuf::from(dir));
        }
        dirs::home_dir().map(|home| home.join(".config").join("folio"))
    }

    /// Get the config file path
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|dir| dir.join("config.toml"))
    }

    /// Load config from file, returning default if the file doesn't exist
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A file that no longer parses is moved aside to
    /// `config.toml.bak` and defaults are used.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        match toml::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                let backup = path.with_extension("toml.bak");
                fs::rename(path, &backup).with_context(|| {
                    format!("Failed to move corrupted config to {}", backup.display())
                })?;
                eprintln!(
                    "{} {} is corrupted ({}); moved it to {} and using defaults.",
                    "Warning:".yellow().bold(),
                    path.display(),
                    e.message().trim(),
                    backup.display()
                );
                Ok(Self::default())
            }
        }
    }

    /// Save config to file, creating directory if needed
    pub fn save(&self) -> Result<()> {
        let path = Self::path().context("Could not determine config path")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn get_site(&self) -> Option<&str> {
        self.site.as_deref()
    }

    pub fn set_site(&mut self, path: String) {
        self.site = Some(path);
    }

    pub fn clear_site(&mut self) {
        self.site = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set_site("/srv/site.toml".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.get_site(), Some("/srv/site.toml"));
    }

    #[test]
    fn test_clear_site() {
        let mut config = Config::default();
        config.set_site("site.toml".to_string());
        config.clear_site();
        assert_eq!(config.get_site(), None);
    }

    #[test]
    fn test_corrupted_file_is_moved_aside() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "site = [unterminated").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(!path.exists());
        assert!(dir.path().join("config.toml.bak").exists());
    }
}
