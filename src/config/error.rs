//! Errors raised while loading and validating configuration.

use thiserror::Error;

/// Failure modes of the layered loader and the `Settings` checks.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration file is missing. Layered loading requires
    /// `default.toml` in the config directory; single-file mode requires
    /// the file named by `STENCIL_CONFIG_FILE`.
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// The configuration deserialized into something `Settings` cannot hold.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A settings value failed a constraint check. `field` is the dotted
    /// key as it appears in TOML (e.g. `jwt.secret`).
    #[error("Invalid value for {field}: {message}")]
    ValidationError { field: String, message: String },

    /// An environment variable carried a value that cannot be used, such
    /// as an unknown `STENCIL_APP_ENV` name.
    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    /// `STENCIL_CONFIG_DIR` and `STENCIL_CONFIG_FILE` are both set; the
    /// loader refuses to guess which one wins.
    #[error("Conflicting configuration sources: {0}")]
    MutualExclusivityError(String),

    /// Anything the underlying `config` crate reports on its own.
    #[error(transparent)]
    Other(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_the_dotted_key() {
        let err = ConfigError::ValidationError {
            field: "jwt.secret".to_string(),
            message: "too short".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for jwt.secret: too short");
    }

    #[test]
    fn file_not_found_carries_the_path() {
        let err = ConfigError::FileNotFound("config/default.toml".to_string());
        assert!(err.to_string().contains("config/default.toml"));
    }
}
