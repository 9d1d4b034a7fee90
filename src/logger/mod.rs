//! Logger initialization built on tracing-subscriber.
//!
//! Console logging with a configurable level, format, and coloring.
//! `RUST_LOG` overrides the configured level when set.

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Standard multi-field format
    #[default]
    Full,
    /// Terse single-line format
    Compact,
    /// Newline-delimited JSON, one object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                s
            )),
        }
    }
}

/// Runtime logger configuration.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// ANSI colors on console output
    pub colored: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            colored: true,
        }
    }
}

/// Initializes the global tracing subscriber.
///
/// Returns an error when a subscriber is already installed, so tests that
/// initialize logging repeatedly should ignore the result.
pub fn init_logger(config: &LoggerConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.colored);

    match config.format {
        LogFormat::Full => builder
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?,
        LogFormat::Compact => builder
            .compact()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?,
        LogFormat::Json => builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_known_values() {
        assert_eq!("full".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert_eq!("COMPACT".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
    }

    #[test]
    fn format_rejects_unknown_values() {
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn default_config_is_info_full_colored() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Full);
        assert!(config.colored);
    }
}
