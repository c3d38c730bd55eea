use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::store::json_store::DEFAULT_SAVE_FILE;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_save_file")]
    pub save_file: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_save_file() -> String {
    DEFAULT_SAVE_FILE.to_string()
}
fn default_theme() -> String {
    "default".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_file: default_save_file(),
            theme: default_theme(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("goal-tracker")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.save_file, "goal.json");
        assert_eq!(config.theme, "default");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_partial_file_keeps_other_defaults() {
        let toml_str = r#"
save_file = "/tmp/savings.json"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.save_file, "/tmp/savings.json");
        assert_eq!(config.theme, "default");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.theme = "mono".to_string();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.save_file, deserialized.save_file);
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.log_level, deserialized.log_level);
    }

    #[test]
    fn test_log_filter_parses_and_falls_back() {
        let mut config = Config::default();
        config.log_level = "debug".to_string();
        assert_eq!(config.log_filter(), log::LevelFilter::Debug);
        config.log_level = "chatty".to_string();
        assert_eq!(config.log_filter(), log::LevelFilter::Info);
    }
}
