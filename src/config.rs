use crate::constants::{self, history, unsplash};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub unsplash: UnsplashConfig,

    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// "pretty" or "json"
    pub log_format: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnsplashConfig {
    pub base_url: String,

    /// API access key, sent as `client_id`.
    /// Overridden by the `UNSPLASH_ACCESS_KEY` environment variable when set.
    pub access_key: String,

    pub user_agent: String,

    /// Transport-level timeout. No timeout when unset.
    pub request_timeout_seconds: Option<u64>,
}

impl Default for UnsplashConfig {
    fn default() -> Self {
        Self {
            base_url: unsplash::DEFAULT_BASE_URL.to_string(),
            access_key: String::new(),
            user_agent: format!("ImageSearcher/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub path: PathBuf,

    pub capacity: usize,

    /// Slot name inside the history file.
    pub key: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir().map_or_else(
            || PathBuf::from("data"),
            |dir| dir.join(constants::APP_NAME),
        );

        Self {
            path: data_dir.join(history::FILE_NAME),
            capacity: history::DEFAULT_CAPACITY,
            key: history::DEFAULT_KEY.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    /// Keeps the credential out of config files when it is provided through
    /// the environment.
    pub fn apply_env_overrides(&mut self) {
        self.override_access_key(std::env::var(unsplash::ACCESS_KEY_ENV).ok());
    }

    /// Replaces the access key unless `value` is missing or blank.
    pub fn override_access_key(&mut self, value: Option<String>) {
        if let Some(key) = value
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
        {
            self.unsplash.access_key = key;
        }
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(Self::default_config_path());

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(constants::APP_NAME).join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(
                home.join(format!(".{}", constants::APP_NAME))
                    .join("config.toml"),
            );
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.unsplash.base_url.trim().is_empty() {
            anyhow::bail!("Unsplash base URL cannot be empty");
        }

        if self.history.capacity == 0 {
            anyhow::bail!("History capacity must be > 0");
        }

        if self.history.key.is_empty() {
            anyhow::bail!("History key cannot be empty");
        }

        Ok(())
    }

    /// Checks that searches can be authorized.
    pub fn require_access_key(&self) -> Result<&str> {
        if self.unsplash.access_key.trim().is_empty() {
            anyhow::bail!(
                "No Unsplash access key configured. Set {} or unsplash.access_key in config.toml",
                unsplash::ACCESS_KEY_ENV
            );
        }
        Ok(&self.unsplash.access_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.unsplash.base_url, "https://api.unsplash.com/");
        assert!(config.unsplash.access_key.is_empty());
        assert_eq!(config.history.capacity, 5);
        assert_eq!(config.history.key, "searchHistory");
        assert!(config.history.path.ends_with("history.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[unsplash]"));
        assert!(toml_str.contains("[history]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [unsplash]
            access_key = "abc"
            request_timeout_seconds = 10
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.unsplash.access_key, "abc");
        assert_eq!(config.unsplash.request_timeout_seconds, Some(10));

        assert_eq!(config.history.capacity, 5);
        assert_eq!(config.unsplash.base_url, "https://api.unsplash.com/");
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let mut config = Config::default();
        config.history.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_access_key_is_reported() {
        let mut config = Config::default();
        assert!(config.require_access_key().is_err());

        config.unsplash.access_key = "key".to_string();
        assert_eq!(config.require_access_key().unwrap(), "key");
    }

    #[test]
    fn test_env_access_key_overrides_config() {
        let mut config = Config::default();
        config.unsplash.access_key = "from-file".to_string();

        config.override_access_key(Some("  from-env \n".to_string()));
        assert_eq!(config.unsplash.access_key, "from-env");
        assert_eq!(config.require_access_key().unwrap(), "from-env");
    }

    #[test]
    fn test_blank_or_missing_env_access_key_is_ignored() {
        let mut config = Config::default();
        config.unsplash.access_key = "from-file".to_string();

        config.override_access_key(None);
        assert_eq!(config.unsplash.access_key, "from-file");

        config.override_access_key(Some("   ".to_string()));
        assert_eq!(config.unsplash.access_key, "from-file");

        config.override_access_key(Some(String::new()));
        assert_eq!(config.unsplash.access_key, "from-file");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("imagesearcher-config-{}", uuid::Uuid::new_v4()))
            .join("config.toml");

        let mut config = Config::default();
        config.history.capacity = 7;
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.history.capacity, 7);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
