//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

// Include shadow-rs generated build information
use shadow_rs::shadow;
shadow!(build);

/// A backend service for users and their items
#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(about = "A backend service for users and their items")]
#[command(long_about = "
Stencil is a Rust web service exposing a JSON API for user accounts and
their items, with JWT authentication, layered configuration, and database
migrations.

EXAMPLES:
    # Start the server with default configuration
    stencil serve

    # Start server on custom host and port
    stencil serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    stencil --config /path/to/config.toml serve

    # Check configuration without starting server
    stencil serve --dry-run

    # Run database migrations
    stencil migrate

    # Preview pending migrations
    stencil migrate --dry-run

    # Rollback last 2 migrations
    stencil migrate --rollback 2
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Specify a custom configuration file to use instead of the default
    /// layered loading. The file should be in TOML format.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Force the application to use a specific environment configuration.
    /// This affects which configuration files are loaded.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Increases log output to debug level. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Launches the HTTP server with the configured settings. The server
    /// binds to the specified host and port, initializes the database
    /// connection pool, and begins accepting requests.
    Serve {
        /// Host address to bind to
        ///
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept
        /// connections from any interface.
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Must be between 1 and 65535.
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Overrides both configuration file settings and the global
        /// --verbose/--quiet flags.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        ///
        /// Performs a complete configuration validation check without
        /// starting the server.
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    ///
    /// Connects to the configured database and applies or rolls back
    /// schema changes.
    Migrate {
        /// Show pending migrations without applying
        ///
        /// Cannot be used with --rollback.
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to rollback
        ///
        /// Reverts the specified number of most recent migrations. Use
        /// with caution as this can result in data loss. Must be between
        /// 1 and 100. Cannot be used with --dry-run.
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Validate CLI arguments beyond what clap enforces declaratively.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(Commands::Migrate { dry_run, rollback }) = &self.command
            && *dry_run
            && rollback.is_some()
        {
            return Err("Cannot use --dry-run and --rollback together".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_behavior_has_no_command() {
        let cli = Cli::try_parse_from(["stencil"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
    }

    #[test]
    fn serve_command_parses_host_and_port() {
        let cli =
            Cli::try_parse_from(["stencil", "serve", "--host", "0.0.0.0", "--port", "8080"])
                .unwrap();
        if let Some(Commands::Serve {
            host,
            port,
            dry_run,
            ..
        }) = cli.command
        {
            assert_eq!(host, Some("0.0.0.0".to_string()));
            assert_eq!(port, Some(8080));
            assert!(!dry_run);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn migrate_command_parses_dry_run() {
        let cli = Cli::try_parse_from(["stencil", "migrate", "--dry-run"]).unwrap();
        if let Some(Commands::Migrate { dry_run, rollback }) = cli.command {
            assert!(dry_run);
            assert!(rollback.is_none());
        } else {
            panic!("Expected Migrate command");
        }
    }

    #[test]
    fn env_flag_covers_every_runtime_environment() {
        for (arg, expected) in [
            ("development", crate::config::Environment::Development),
            ("test", crate::config::Environment::Test),
            ("staging", crate::config::Environment::Staging),
            ("stage", crate::config::Environment::Staging),
            ("production", crate::config::Environment::Production),
        ] {
            let cli = Cli::try_parse_from(["stencil", "--env", arg]).unwrap();
            let env: crate::config::Environment = cli.env.unwrap().into();
            assert_eq!(env, expected, "--env {}", arg);
        }
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["stencil", "--verbose", "--quiet"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn migrate_dry_run_and_rollback_conflict() {
        let result = Cli::try_parse_from(["stencil", "migrate", "--dry-run", "--rollback", "2"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }
}
