use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable that overrides `database.path`.
pub const DB_PATH_ENV: &str = "WXLOG_DB_PATH";

pub const DEFAULT_API_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Config is unusable.
    Error,
    /// Config works but is probably not what was intended.
    Warning,
}

/// One finding from [`Config::validate`], keyed by dotted TOML path.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    issues: Vec<ConfigIssue>,
}

impl ValidationResult {
    /// Warnings alone keep a config valid.
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &ConfigIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, field.into(), message.into());
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warning, field.into(), message.into());
    }

    fn push(&mut self, severity: Severity, field: String, message: String) {
        self.issues.push(ConfigIssue {
            severity,
            field,
            message,
        });
    }

    /// Errors joined on one line, for log output and error contexts.
    pub fn error_summary(&self) -> String {
        let mut summary = String::new();
        for (i, issue) in self.errors().enumerate() {
            if i > 0 {
                summary.push_str("; ");
            }
            summary.push_str(&issue.to_string());
        }
        summary
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Remote weather API settings
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wxlog")
        .join("weather.db")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Hourly forecast endpoint
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Retries on transient failures (timeouts, 5xx, 429)
    pub max_retries: u32,

    /// First backoff delay; doubles on every retry
    pub initial_delay_ms: u64,

    pub max_delay_ms: u64,

    /// How long a successful response is served from the cache
    pub cache_ttl_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: 10,
            max_retries: 5,
            initial_delay_ms: 200,
            max_delay_ms: 5000,
            cache_ttl_secs: 3600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str::<Config>(&contents)
                .map_err(|e| ConfigError::Malformed(format!("{}: {}", path.display(), e)))?
        } else {
            let config = Self::default();
            config.save_to(path)?;
            config
        };

        if let Ok(db_path) = std::env::var(DB_PATH_ENV) {
            if !db_path.is_empty() {
                config.database.path = PathBuf::from(db_path);
            }
        }

        Ok(config)
    }

    /// Load configuration and reject it if validation reports errors.
    ///
    /// Warnings are returned alongside the config for the caller to report
    /// once logging is up.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.api.base_url, "api.base_url", &mut result);

        if self.api.timeout_secs == 0 {
            result.add_error("api.timeout_secs", "Timeout must be greater than 0");
        } else if self.api.timeout_secs > 300 {
            result.add_warning("api.timeout_secs", "Timeout is unusually long (>300s)");
        }

        if self.api.max_retries > 10 {
            result.add_warning("api.max_retries", "More than 10 retries per request");
        }

        if self.api.initial_delay_ms > self.api.max_delay_ms {
            result.add_error(
                "api.initial_delay_ms",
                "Initial retry delay exceeds api.max_delay_ms",
            );
        }

        if self.api.cache_ttl_secs == 0 {
            result.add_warning("api.cache_ttl_secs", "Response caching disabled (0 seconds)");
        }

        if self.database.path.as_os_str().is_empty() {
            result.add_error("database.path", "Database path must not be empty");
        }

        if self.logging.level.trim().is_empty() {
            result.add_warning("logging.level", "Empty log level, falling back to info");
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }
                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents).context("Failed to write config file")?;
        Ok(())
    }

    /// `<config dir>/wxlog/config.toml`
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NoConfigDir("dirs::config_dir() returned None".into()))?
            .join("wxlog");

        Ok(config_dir.join("config.toml"))
    }
}
