//! Configuration file support for sentiview
//!
//! Reads from .sentiview/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Environment variable that overrides the configured endpoint
pub const ENDPOINT_ENV: &str = "SENTIVIEW_ENDPOINT";

/// Configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    /// Analysis endpoint settings
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// HTML report settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where submissions are POSTed
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct EndpointConfig {
    /// Full URL of the analysis endpoint (e.g., "http://localhost:8000/analyze/")
    #[serde(default)]
    pub url: Option<String>,

    /// Request timeout in seconds. Unset means no client-side timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// HTML report output
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReportConfig {
    /// Directory for auto-named reports
    /// Default: "sentiview-reports"
    #[serde(default = "default_report_dir")]
    pub dir: PathBuf,
}

/// Log output
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    /// Default: "warn"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Write logs to this file instead of stderr (the TUI only logs when set)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("sentiview-reports")
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dir: default_report_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Error type for configuration problems
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, message: String },
    MissingEndpoint,
    InvalidEndpoint { url: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "Invalid config {}: {}", path.display(), message)
            }
            ConfigError::MissingEndpoint => write!(
                f,
                "No analysis endpoint configured. Pass --endpoint, set {}, or add [endpoint] url to .sentiview/config.toml",
                ENDPOINT_ENV
            ),
            ConfigError::InvalidEndpoint { url, message } => {
                write!(f, "Invalid endpoint '{}': {}", url, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Config {
    /// Load config from .sentiview/config.toml
    /// Returns default config if no file exists
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Find config.toml by walking up directory tree
    fn find_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        Self::find_config_path_from(&current_dir)
    }

    fn find_config_path_from(start: &Path) -> Option<PathBuf> {
        let mut dir = start;

        loop {
            let config_path = dir.join(".sentiview").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            match dir.parent() {
                Some(parent) => dir = parent,
                None => break,
            }
        }
        None
    }

    /// Resolve the endpoint: flag, then environment, then config file
    pub fn resolve_endpoint(
        &self,
        flag: Option<&str>,
        env: Option<&str>,
    ) -> Result<Url, ConfigError> {
        let raw = flag
            .or(env)
            .or(self.endpoint.url.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingEndpoint)?;

        let url = Url::parse(raw).map_err(|e| ConfigError::InvalidEndpoint {
            url: raw.to_string(),
            message: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidEndpoint {
                url: raw.to_string(),
                message: format!("unsupported scheme '{}'", other),
            }),
        }
    }

    /// Client-side request timeout, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.endpoint.timeout_secs.map(Duration::from_secs)
    }
}
