//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/linksync/config.toml)
//! 3. Environment variables (LINKSYNC_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::reconcile::DEFAULT_CONCURRENCY;
use crate::remote::DEFAULT_API_URL;

/// Environment variable prefix
const ENV_PREFIX: &str = "LINKSYNC";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the shortener API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API key sent with every request
    #[serde(default)]
    pub api_key: Option<String>,

    /// Links file used when none is given on the command line
    #[serde(default = "default_links_file")]
    pub links_file: PathBuf,

    /// Maximum concurrent write requests per phase
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            links_file: default_links_file(),
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (LINKSYNC_API_URL, LINKSYNC_API_KEY, ...)
    /// 2. Config file (~/.config/linksync/config.toml or LINKSYNC_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = Self::load_file_only(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load only what the config file itself holds
    ///
    /// Used before writing the file back, so values that came from the
    /// environment are never persisted.
    pub fn load_file_only(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // LINKSYNC_API_URL
        if let Ok(val) = std::env::var(format!("{}_API_URL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.api_url = val;
            }
        }

        // LINKSYNC_API_KEY
        if let Ok(val) = std::env::var(format!("{}_API_KEY", ENV_PREFIX)) {
            self.api_key = if val.is_empty() { None } else { Some(val) };
        }

        // LINKSYNC_LINKS_FILE
        if let Ok(val) = std::env::var(format!("{}_LINKS_FILE", ENV_PREFIX)) {
            if !val.is_empty() {
                self.links_file = PathBuf::from(val);
            }
        }

        // LINKSYNC_CONCURRENCY (ignored unless a positive integer)
        if let Ok(val) = std::env::var(format!("{}_CONCURRENCY", ENV_PREFIX)) {
            if let Ok(n) = val.parse::<usize>() {
                if n > 0 {
                    self.concurrency = n;
                }
            }
        }
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with LINKSYNC_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("linksync")
            .join("config.toml")
    }

    /// API key with all but the last four characters hidden
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| {
            let chars: Vec<char> = key.chars().collect();
            if chars.len() <= 4 {
                return "*".repeat(chars.len());
            }
            let visible = chars.len() - 4;
            let tail: String = chars[visible..].iter().collect();
            format!("{}{}", "*".repeat(visible.min(8)), tail)
        })
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_links_file() -> PathBuf {
    PathBuf::from("links.yaml")
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "LINKSYNC_API_URL",
        "LINKSYNC_API_KEY",
        "LINKSYNC_LINKS_FILE",
        "LINKSYNC_CONCURRENCY",
        "LINKSYNC_CONFIG",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_url, "https://api.short.io");
        assert!(config.api_key.is_none());
        assert_eq!(config.links_file, PathBuf::from("links.yaml"));
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_env_override_api_key() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("LINKSYNC_API_KEY", "sk_test");
        config.apply_env_overrides();
        assert_eq!(config.api_key, Some("sk_test".to_string()));

        // Empty string clears it
        env::set_var("LINKSYNC_API_KEY", "");
        config.apply_env_overrides();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_env_override_concurrency() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("LINKSYNC_CONCURRENCY", "8");
        config.apply_env_overrides();
        assert_eq!(config.concurrency, 8);

        env::set_var("LINKSYNC_CONCURRENCY", "0");
        config.apply_env_overrides();
        assert_eq!(config.concurrency, 8);

        env::set_var("LINKSYNC_CONCURRENCY", "lots");
        config.apply_env_overrides();
        assert_eq!(config.concurrency, 8);
    }

    #[test]
    fn test_env_override_url_and_links_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("LINKSYNC_API_URL", "http://localhost:8080");
        env::set_var("LINKSYNC_LINKS_FILE", "/srv/links.yaml");
        config.apply_env_overrides();

        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.links_file, PathBuf::from("/srv/links.yaml"));
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            api_url = "https://shortener.internal"
            api_key = "abc123"
            concurrency = 2
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.api_url, "https://shortener.internal");
        assert_eq!(config.api_key, Some("abc123".to_string()));
        assert_eq!(config.concurrency, 2);
        // Unset keys keep their defaults
        assert_eq!(config.links_file, PathBuf::from("links.yaml"));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            api_key: Some("secret".to_string()),
            timeout_secs: 5,
            ..Config::default()
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.api_key, Some("secret".to_string()));
        assert_eq!(loaded.timeout_secs, 5);
    }

    #[test]
    fn test_load_file_only_ignores_env() {
        let _guard = EnvGuard::new(ENV_VARS);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeout_secs = 9\n").unwrap();

        env::set_var("LINKSYNC_API_KEY", "sk_from_env_only");
        env::set_var("LINKSYNC_CONCURRENCY", "16");

        let config = Config::load_file_only(&path).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.timeout_secs, 9);

        config.save_to_path(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("sk_from_env_only"));
    }

    #[test]
    fn test_config_file_path_override() {
        let _guard = EnvGuard::new(ENV_VARS);

        env::set_var("LINKSYNC_CONFIG", "/etc/linksync.toml");
        assert_eq!(
            Config::config_file_path(),
            PathBuf::from("/etc/linksync.toml")
        );
    }

    #[test]
    fn test_masked_api_key() {
        let config = Config {
            api_key: Some("sk_live_abcd1234".to_string()),
            ..Config::default()
        };
        assert_eq!(config.masked_api_key(), Some("********1234".to_string()));

        let short = Config {
            api_key: Some("abc".to_string()),
            ..Config::default()
        };
        assert_eq!(short.masked_api_key(), Some("***".to_string()));
    }
}
