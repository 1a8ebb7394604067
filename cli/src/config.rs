// Configuration management for the chatstore CLI
//
// Cross-platform config stored in:
// - macOS: ~/Library/Application Support/chatstore/config.json
// - Linux: ~/.config/chatstore/config.json
// - Windows: %APPDATA%\chatstore\config.json

use anyhow::{Context, Result};
use chatstore_core::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filter used when RUST_LOG is not set
    pub log_level: String,

    /// Indent JSON output
    pub pretty_json: bool,

    /// Seeding behaviour of the store
    pub store: StoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            pretty_json: false,
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    /// Get the config file path (cross-platform)
    pub fn default_file() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("chatstore");
        Ok(config_dir.join("config.json"))
    }

    /// Load config from `path`, or write and return the defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config: Config =
                serde_json::from_str(&contents).context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).context("Failed to create config directory")?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents).context("Failed to write config file")?;
        Ok(())
    }

    /// Set a config value
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "log_level" => self.log_level = value.to_string(),
            "pretty_json" => {
                self.pretty_json = value.parse().context("Invalid boolean value")?;
            }
            "seed_users" => {
                self.store.seed_users = value.parse().context("Invalid boolean value")?;
            }
            "seed_messages" => {
                self.store.seed_messages = value.parse().context("Invalid boolean value")?;
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    /// Get a config value
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "log_level" => Some(self.log_level.clone()),
            "pretty_json" => Some(self.pretty_json.to_string()),
            "seed_users" => Some(self.store.seed_users.to_string()),
            "seed_messages" => Some(self.store.seed_messages.to_string()),
            _ => None,
        }
    }

    /// List all config values
    pub fn list(&self) -> Vec<(String, String)> {
        ["log_level", "pretty_json", "seed_users", "seed_messages"]
            .iter()
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, "warn");
        assert!(!config.pretty_json);
        assert!(config.store.seed_users);
        assert!(config.store.seed_messages);
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_set_save_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::load_from(&path).unwrap();
        config.set("pretty_json", "true").unwrap();
        config.set("seed_messages", "false").unwrap();
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert!(reloaded.pretty_json);
        assert!(!reloaded.store.seed_messages);
        assert_eq!(reloaded.get("seed_messages").as_deref(), Some("false"));
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.set("pretty_json", "maybe").is_err());
        assert!(config.set("no_such_key", "1").is_err());
        assert!(config.get("no_such_key").is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"log_level":"debug"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.store.seed_users);
        assert_eq!(config.list().len(), 4);
    }
}
