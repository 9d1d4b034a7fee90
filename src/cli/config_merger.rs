//! Configuration merger for CLI arguments and config files
//!
//! This module handles merging CLI argument overrides with file-based
//! configuration, implementing the configuration precedence logic.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};
use std::path::PathBuf;

/// Configuration merger that applies CLI argument overrides on top of
/// file-based configuration.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Create a configuration merger by loading configuration from the
    /// specified path or the default layered loader.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading fails
    pub fn from_config_path(config_path: Option<&PathBuf>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_path {
            Self::validate_config_file_access(path)?;
            Self::load_config_from_file(path)?
        } else {
            ConfigLoader::new()?.load()?
        };

        Ok(Self::new(config))
    }

    /// Validate that the configuration file is accessible and readable
    fn validate_config_file_access(path: &PathBuf) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ValidationError {
                field: "config_file".to_string(),
                message: format!("Configuration file does not exist: '{}'", path.display()),
            });
        }

        if !path.is_file() {
            return Err(ConfigError::ValidationError {
                field: "config_file".to_string(),
                message: format!("Configuration path is not a file: '{}'", path.display()),
            });
        }

        match std::fs::File::open(path) {
            Ok(_) => Ok(()),
            Err(e) => Err(ConfigError::ValidationError {
                field: "config_file".to_string(),
                message: format!("Cannot read configuration file '{}': {}", path.display(), e),
            }),
        }
    }

    /// Load configuration from a specific file path
    fn load_config_from_file(path: &PathBuf) -> Result<Settings, ConfigError> {
        // The loader reads the single-file mode from the environment.
        unsafe {
            std::env::set_var("STENCIL_CONFIG_FILE", path);
        }

        let loader = ConfigLoader::new();
        let config = loader.and_then(|l| l.load());

        unsafe {
            std::env::remove_var("STENCIL_CONFIG_FILE");
        }

        config
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// CLI arguments have the highest priority; configuration file values
    /// are the base. The merged result is validated before being returned.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        self.apply_global_overrides(&mut config, cli);

        if let Some(ref command) = cli.command {
            self.apply_command_overrides(&mut config, command);
        }

        config.validate()?;

        Ok(config)
    }

    /// Apply global CLI argument overrides
    fn apply_global_overrides(&self, config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    /// Apply command-specific CLI argument overrides
    fn apply_command_overrides(&self, config: &mut Settings, command: &Commands) {
        match command {
            Commands::Serve {
                host,
                port,
                log_level,
                dry_run: _,
            } => {
                if let Some(host_addr) = host {
                    config.server.host = host_addr.clone();
                }

                if let Some(port_num) = port {
                    config.server.port = *port_num;
                }

                // Command-specific override beats the global --verbose/--quiet
                if let Some(level) = log_level {
                    config.logger.level = level.clone().into();
                }
            }
            Commands::Migrate { .. } => {}
        }
    }

    /// Get the current configuration (useful for inspection)
    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{DatabaseConfig, JwtConfig, SuperuserConfig};
    use clap::Parser;

    fn create_valid_base_config() -> Settings {
        Settings {
            database: DatabaseConfig {
                url: "postgres://localhost/test".to_string(),
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
    fn verbose_flag_raises_log_level() {
        let merger = ConfigurationMerger::new(create_valid_base_config());
        let cli = Cli::try_parse_from(["stencil", "--verbose"]).unwrap();
        let merged = merger.merge_cli_args(&cli).unwrap();
        assert_eq!(merged.logger.level, "debug");
    }

    #[test]
    fn quiet_flag_lowers_log_level() {
        let merger = ConfigurationMerger::new(create_valid_base_config());
        let cli = Cli::try_parse_from(["stencil", "--quiet"]).unwrap();
        let merged = merger.merge_cli_args(&cli).unwrap();
        assert_eq!(merged.logger.level, "error");
    }

    #[test]
    fn serve_host_and_port_override_config() {
        let merger = ConfigurationMerger::new(create_valid_base_config());
        let cli = Cli::try_parse_from(["stencil", "serve", "--host", "0.0.0.0", "--port", "8080"])
            .unwrap();
        let merged = merger.merge_cli_args(&cli).unwrap();
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
    }

    #[test]
    fn command_log_level_overrides_global_flag() {
        let merger = ConfigurationMerger::new(create_valid_base_config());
        let cli = Cli::try_parse_from(["stencil", "--verbose", "serve", "--log-level", "warn"])
            .unwrap();
        let merged = merger.merge_cli_args(&cli).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn merge_rejects_invalid_config() {
        let mut config = create_valid_base_config();
        config.jwt.secret = "short".to_string();
        let merger = ConfigurationMerger::new(config);
        let cli = Cli::try_parse_from(["stencil"]).unwrap();
        assert!(merger.merge_cli_args(&cli).is_err());
    }
}
