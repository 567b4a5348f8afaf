//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::RowsPerPage;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub table: TableConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HQ API connection
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Where the CLI keeps its login cookies
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_file")]
    pub file: String,
}

fn default_session_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("hq-console").join("session.json"))
        .unwrap_or_else(|| PathBuf::from("./.hq-console-session.json"))
        .to_string_lossy()
        .to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

/// List defaults
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    /// Initial page size; -1 means all rows
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: i64,
}

fn default_rows_per_page() -> i64 {
    5
}

impl TableConfig {
    pub fn rows_per_page(&self) -> RowsPerPage {
        RowsPerPage::from_wire(self.rows_per_page).unwrap_or_default()
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            rows_per_page: default_rows_per_page(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("hq-console").join("config.toml")),
            Some(PathBuf::from("/etc/hq-console/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("HQ_CONSOLE_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = var("HQ_CONSOLE_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.api.request_timeout_secs = secs;
            }
        }
        if let Some(file) = var("HQ_CONSOLE_SESSION_FILE") {
            self.session.file = file;
        }
        if let Some(level) = var("HQ_CONSOLE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("HQ_CONSOLE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# HQ Console Configuration
#
# Environment variables override these settings:
# - HQ_CONSOLE_API_URL
# - HQ_CONSOLE_TIMEOUT_SECS
# - HQ_CONSOLE_SESSION_FILE
# - HQ_CONSOLE_LOG_LEVEL
# - HQ_CONSOLE_LOG_FORMAT

[api]
# Base URL of the HQ REST API
base_url = "http://localhost:8000/api"

# Request timeout in seconds
request_timeout_secs = 30

[session]
# File holding the login cookies between CLI runs
# file = "~/.local/share/hq-console/session.json"

[table]
# Rows per page for list commands (5, 10, 25 or -1 for all)
rows_per_page = 5

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.table.rows_per_page(), RowsPerPage::Count(5));
        assert_eq!(config.logging.format, "pretty");
        assert!(config.session.file.ends_with("session.json"));
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"https://hq.example.com/api\"\n[table]\nrows_per_page = -1").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://hq.example.com/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.table.rows_per_page(), RowsPerPage::All);
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("HQ_CONSOLE_API_URL", "http://10.0.0.2/api"),
            ("HQ_CONSOLE_TIMEOUT_SECS", "nope"),
            ("HQ_CONSOLE_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://10.0.0.2/api");
        // Unparseable numbers are ignored
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_zero_rows_falls_back() {
        let table = TableConfig { rows_per_page: 0 };
        assert_eq!(table.rows_per_page(), RowsPerPage::Count(5));
    }
}
