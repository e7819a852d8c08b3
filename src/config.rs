//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// File this config was read from, `None` when built from defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Entry store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("weightlog"))
        .unwrap_or_else(|| PathBuf::from("./weightlog_data"))
        .join("entries.db")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Client (CLI) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the entry store server
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// How long a comparison notification stays visible
    #[serde(default = "default_notice_delay")]
    pub notice_delay_ms: u64,
}

fn default_api_url() -> String {
    "http://localhost:8082".to_string()
}

fn default_request_timeout() -> u64 {
    5000
}

fn default_notice_delay() -> u64 {
    3000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_ms: default_request_timeout(),
            notice_delay_ms: default_notice_delay(),
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
    "info".to_string()
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

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Locations searched by [`Config::load_default`], in order
    pub fn search_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("weightlog").join("config.toml")),
            Some(PathBuf::from("/etc/weightlog/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load the first existing file in `paths`, or defaults if none exists
    ///
    /// A file that exists but cannot be read or parsed is an error; it is
    /// never skipped in favour of a later path or the defaults.
    pub fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|p| p.exists()) {
            Some(path) => Self::load_with_env(path),
            None => Self::from_env(),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_first(&Self::search_paths())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(db_path) = lookup("WEIGHTLOG_DB_PATH") {
            self.storage.db_path = PathBuf::from(db_path);
        }

        if let Some(host) = lookup("WEIGHTLOG_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("WEIGHTLOG_API_PORT") {
            self.api.port = port.parse().map_err(|_| ConfigError::Env {
                key: "WEIGHTLOG_API_PORT",
                value: port.clone(),
            })?;
        }

        if let Some(url) = lookup("WEIGHTLOG_API_URL") {
            self.client.api_url = url;
        }

        if let Some(level) = lookup("WEIGHTLOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("WEIGHTLOG_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {key}: {value:?}")]
    Env { key: &'static str, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Weightlog Configuration
#
# Environment variables override these settings:
# - WEIGHTLOG_DB_PATH
# - WEIGHTLOG_API_HOST
# - WEIGHTLOG_API_PORT
# - WEIGHTLOG_API_URL
# - WEIGHTLOG_LOG_LEVEL
# - WEIGHTLOG_LOG_FORMAT

[storage]
# SQLite database holding the weight entries
db_path = "./weightlog_data/entries.db"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8082

# Allowed CORS origins (empty = allow any origin)
cors_origins = []

[client]
# Entry store server used by weightlog-cli
api_url = "http://localhost:8082"

# Request timeout in milliseconds
request_timeout_ms = 5000

# How long the increased/decreased notification stays up (ms)
notice_delay_ms = 3000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
