//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `postboard.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `postboard.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("postboard.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`, later keys winning over earlier ones:
    /// `POSTBOARD_BIND` beats `POSTBOARD_HOST`/`POSTBOARD_PORT`, and
    /// `RUST_LOG` beats `POSTBOARD_LOG`. Unparsable ports are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("POSTBOARD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("POSTBOARD_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(bind) = lookup("POSTBOARD_BIND")
            && let Some((host, port)) = bind.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(url) = lookup("POSTBOARD_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(filter) = lookup("POSTBOARD_LOG") {
            self.logging.filter = filter;
        }
        if let Some(filter) = lookup("RUST_LOG") {
            self.logging.filter = filter;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Build the storage adapter configuration.
    #[must_use]
    pub fn storage(&self) -> postboard_adapter_storage_sqlite_sqlx::Config {
        postboard_adapter_storage_sqlite_sqlx::Config {
            database_url: self.database.url.clone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:postboard.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "postboardd=info,postboard=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_override_host_and_port_from_env() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("POSTBOARD_HOST", "127.0.0.1"),
            ("POSTBOARD_PORT", "8080"),
        ]));
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn should_prefer_bind_over_host_and_port() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("POSTBOARD_HOST", "127.0.0.1"),
            ("POSTBOARD_PORT", "8080"),
            ("POSTBOARD_BIND", "localhost:9000"),
        ]));
        assert_eq!(config.bind_addr(), "localhost:9000");
    }

    #[test]
    fn should_ignore_unparsable_port() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("POSTBOARD_PORT", "many")]));
        assert_eq!(config.server.port, 5001);
    }

    #[test]
    fn should_prefer_rust_log_over_postboard_log() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("POSTBOARD_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");

        let mut config = Config::default();
        config.apply_overrides(env(&[("POSTBOARD_LOG", "warn")]));
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_override_database_url_and_build_storage_config() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("POSTBOARD_DATABASE_URL", "sqlite::memory:")]));
        assert_eq!(config.storage().database_url, "sqlite::memory:");
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.database.url, "sqlite:postboard.db?mode=rwc");
        assert_eq!(
            config.logging.filter,
            "postboardd=info,postboard=info,tower_http=debug"
        );
    }

    #[test]
    fn should_parse_minimal_toml() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 5001);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [database]
            url = 'sqlite:test.db'

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 5001);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(message)) if message == "port must be non-zero"
        ));
    }

    #[test]
    fn should_reject_unknown_value_types() {
        let result: Result<Config, _> = toml::from_str("[server]\nport = 'high'");
        assert!(result.is_err());
    }

    #[test]
    fn should_accept_valid_port() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:5001");
    }

    #[test]
    fn should_format_custom_bind_addr() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 9090;
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn should_return_database_url() {
        let config = Config::default();
        assert_eq!(config.database_url(), "sqlite:postboard.db?mode=rwc");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [server]
            port = 8080
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "sqlite:postboard.db?mode=rwc");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
