//! Configuration settings structures.
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "stencil".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

fn default_true() -> bool {
    true
}

fn default_access_token_expiration() -> i64 {
    8 // 8 hours
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// Diesel database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default)]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Whether to automatically run pending migrations on startup
    #[serde(default)]
    pub auto_migrate: bool,
}

impl DatabaseConfig {
    /// Validates the database configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "database.url".to_string(),
                message: "Database URL cannot be empty".to_string(),
            });
        }

        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ConfigError::ValidationError {
                field: "database.url".to_string(),
                message: "Database URL must be a postgres:// or postgresql:// URL".to_string(),
            });
        }

        if self.max_connections == 0 {
            return Err(ConfigError::ValidationError {
                field: "database.max_connections".to_string(),
                message: "Maximum connections must be greater than 0".to_string(),
            });
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: "Minimum connections cannot exceed maximum connections".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: false,
        }
    }
}

// ============================================================================
// JWT Configuration
// ============================================================================

/// JWT authentication configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing JWT tokens
    /// IMPORTANT: This should be a strong, random string in production
    /// and should be kept secret (use environment variables)
    #[serde(default)]
    pub secret: String,

    /// Access token expiration time in hours
    #[serde(default = "default_access_token_expiration")]
    pub access_token_expiration: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_token_expiration: default_access_token_expiration(),
        }
    }
}

impl JwtConfig {
    /// Validates the JWT configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "jwt.secret".to_string(),
                message: "JWT secret cannot be empty".to_string(),
            });
        }

        if self.secret.len() < 32 {
            return Err(ConfigError::ValidationError {
                field: "jwt.secret".to_string(),
                message: "JWT secret should be at least 32 characters for security".to_string(),
            });
        }

        if self.access_token_expiration <= 0 {
            return Err(ConfigError::ValidationError {
                field: "jwt.access_token_expiration".to_string(),
                message: "Access token expiration must be positive".to_string(),
            });
        }

        Ok(())
    }
}

// ============================================================================
// Superuser Configuration
// ============================================================================

/// First-run superuser account configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SuperuserConfig {
    /// Email of the bootstrap superuser account
    #[serde(default)]
    pub email: String,

    /// Password of the bootstrap superuser account
    #[serde(default)]
    pub password: String,
}

impl SuperuserConfig {
    /// Validates the superuser configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.email.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "superuser.email".to_string(),
                message: "Superuser email cannot be empty".to_string(),
            });
        }

        if self.password.len() < 8 {
            return Err(ConfigError::ValidationError {
                field: "superuser.password".to_string(),
                message: "Superuser password must be at least 8 characters".to_string(),
            });
        }

        Ok(())
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            colored: default_true(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to the runtime LoggerConfig
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.format".to_string(),
                message: e,
            })?;

        Ok(LoggerConfig {
            level: self.level,
            format,
            colored: self.colored,
        })
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// This structure represents the entire configuration that can be loaded
/// from TOML files and environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// JWT authentication configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// First-run superuser account
    #[serde(default)]
    pub superuser: SuperuserConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,
}

impl Settings {
    /// Validates every section that has constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.jwt.validate()?;
        self.superuser.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        Settings {
            database: DatabaseConfig {
                url: "postgres://localhost/stencil".to_string(),
                ..Default::default()
            },
            jwt: JwtConfig {
                secret: "a".repeat(32),
                ..Default::default()
            },
            superuser: SuperuserConfig {
                email: "admin@example.com".to_string(),
                password: "changethis".to_string(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn valid_settings_pass_validation() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn server_address_joins_host_and_port() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn empty_database_url_is_rejected() {
        let mut settings = valid_settings();
        settings.database.url = String::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn non_postgres_url_is_rejected() {
        let mut settings = valid_settings();
        settings.database.url = "mysql://localhost/db".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn short_jwt_secret_is_rejected() {
        let mut settings = valid_settings();
        settings.jwt.secret = "short".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn min_connections_cannot_exceed_max() {
        let mut settings = valid_settings();
        settings.database.min_connections = 20;
        settings.database.max_connections = 5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn short_superuser_password_is_rejected() {
        let mut settings = valid_settings();
        settings.superuser.password = "short".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn logger_settings_convert_to_config() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            format: "json".to_string(),
            colored: false,
        };
        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let settings = LoggerSettings {
            format: "xml".to_string(),
            ..Default::default()
        };
        assert!(settings.into_logger_config().is_err());
    }
}
