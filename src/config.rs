//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dashboard::DEFAULT_REFRESH_INTERVAL;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Admin REST API connection
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000/api/admin".to_string()
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

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Base URL without a trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Full URL of an endpoint relative to the base
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.normalized_base_url(), path.trim_start_matches('/'))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Session token location and dashboard refresh
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Token file; defaults to the user config directory
    #[serde(default)]
    pub token_file: Option<String>,

    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

fn default_refresh_interval() -> u64 {
    DEFAULT_REFRESH_INTERVAL.as_secs()
}

fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .map(|p| p.join("checkin-admin").join("token"))
        .unwrap_or_else(|| PathBuf::from(".checkin-admin-token"))
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: None,
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

impl SessionConfig {
    pub fn token_path(&self) -> PathBuf {
        self.token_file
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(default_token_path)
    }

    /// Refresh period; never shorter than one second
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
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
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber. `RUST_LOG` takes precedence
    /// over the configured level.
    pub fn init(&self) -> Result<(), ConfigError> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("checkin_admin={}", self.level)));

        let writer = match &self.file {
            Some(path) => {
                let file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| ConfigError::Io {
                        path: PathBuf::from(path),
                        error: e.to_string(),
                    })?;
                tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::sync::Mutex::new(file))
            }
            None => tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stderr),
        };

        let registry = tracing_subscriber::registry().with(filter);
        let result = if self.format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
                .try_init()
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(writer))
                .try_init()
        };

        result.map_err(|e| ConfigError::Logging(e.to_string()))
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
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

    /// Load from default locations or environment.
    ///
    /// A discovered file that fails to read or parse is an error; only the
    /// absence of every candidate falls back to defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths = [
            Some(PathBuf::from("./checkin-admin.toml")),
            dirs::config_dir().map(|p| p.join("checkin-admin").join("config.toml")),
        ];

        Self::load_first(config_paths.iter().flatten())
    }

    fn load_first<'a>(
        candidates: impl IntoIterator<Item = &'a PathBuf>,
    ) -> Result<Self, ConfigError> {
        match candidates.into_iter().find(|path| path.exists()) {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::from_env()),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("CHECKIN_API_URL") {
            self.api.base_url = url;
        }
        if let Some(secs) = lookup("CHECKIN_REQUEST_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.api.request_timeout_secs = s;
            }
        }

        if let Some(path) = lookup("CHECKIN_TOKEN_FILE") {
            self.session.token_file = Some(path);
        }
        if let Some(secs) = lookup("CHECKIN_REFRESH_SECS") {
            if let Ok(s) = secs.parse() {
                self.session.refresh_interval_secs = s;
            }
        }

        if let Some(level) = lookup("CHECKIN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("CHECKIN_LOG_FORMAT") {
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

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Check-in Admin Configuration
#
# Environment variables override these settings:
# - CHECKIN_API_URL
# - CHECKIN_REQUEST_TIMEOUT_SECS
# - CHECKIN_TOKEN_FILE
# - CHECKIN_REFRESH_SECS
# - CHECKIN_LOG_LEVEL
# - CHECKIN_LOG_FORMAT

[api]
# Base URL of the admin REST API
base_url = "http://localhost:3000/api/admin"

# Request timeout in seconds
request_timeout_secs = 30

[session]
# File holding the session token (default: <config dir>/checkin-admin/token)
# token_file = "/home/me/.config/checkin-admin/token"

# Dashboard auto-refresh period in seconds
refresh_interval_secs = 60

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/checkin-admin.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:3000/api/admin");
        assert_eq!(config.session.refresh_interval(), Duration::from_secs(60));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.session.refresh_interval_secs, 60);
        assert!(config.session.token_file.is_none());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"https://visitors.example.org/api/admin/\"\n\n[session]\ntoken_file = \"/tmp/tok\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.api.endpoint("dashboard"),
            "https://visitors.example.org/api/admin/dashboard"
        );
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.session.token_path(), PathBuf::from("/tmp/tok"));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = 1").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            Config::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_malformed_discovered_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("checkin-admin.toml");
        std::fs::write(
            &local,
            "[session]\ntoken_file = \"/tmp/mytok\"\nrefresh_interval_secs = \"sixty\"\n",
        )
        .unwrap();
        let fallback = dir.path().join("config.toml");
        std::fs::write(&fallback, "[api]\nbase_url = \"http://other/api/admin\"\n").unwrap();

        let result = Config::load_first([&local, &fallback]);
        match result {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, local),
            other => panic!("expected a parse error, got {:?}", other.map(|c| c.api)),
        }
    }

    #[test]
    fn test_first_existing_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("checkin-admin.toml");
        let present = dir.path().join("config.toml");
        std::fs::write(&present, "[session]\ntoken_file = \"/tmp/mytok\"\n").unwrap();

        let config = Config::load_first([&missing, &present]).unwrap();
        assert_eq!(config.session.token_file.as_deref(), Some("/tmp/mytok"));

        assert!(Config::load_first([&missing]).is_ok());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CHECKIN_API_URL", "http://10.0.0.5:3000/api/admin"),
            ("CHECKIN_REFRESH_SECS", "15"),
            ("CHECKIN_REQUEST_TIMEOUT_SECS", "not-a-number"),
            ("CHECKIN_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://10.0.0.5:3000/api/admin");
        assert_eq!(config.session.refresh_interval_secs, 15);
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_refresh_interval_floor() {
        let session = SessionConfig {
            token_file: None,
            refresh_interval_secs: 0,
        };
        assert_eq!(session.refresh_interval(), Duration::from_secs(1));
    }
}
