//! Tracing subscriber initialisation.
//!
//! Maps the `LOG_FORMAT` / `LOG_LEVEL` settings onto a `tracing-subscriber`
//! registry. `RUST_LOG`, when set, takes precedence over the configured level.

use std::{fmt, str::FromStr};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Tracing initialisation errors.
#[derive(Error, Debug)]
pub enum TracingError {
    /// Unknown log level tag
    #[error("Unknown log level: {0}")]
    InvalidLevel(String),

    /// A global subscriber was already installed
    #[error("Failed to install tracing subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Plain `key=value` text lines
    Logfmt,
}

impl LogFormat {
    /// The configuration tag for this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Logfmt => "LOGFMT",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JSON" => Ok(Self::Json),
            "LOGFMT" => Ok(Self::Logfmt),
            other => Err(format!("expected JSON or LOGFMT, got {other:?}")),
        }
    }
}

/// Tracing configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Log level tag, e.g. `INFO`
    pub log_level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_level: "INFO".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl TracingConfig {
    /// Set the log level tag.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the output format.
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Resolve the level tag into a filter.
    ///
    /// Accepts the logrus-style tags as well (`PANIC`, `FATAL`, `WARNING`),
    /// folded onto the nearest tracing level.
    ///
    /// # Errors
    ///
    /// Returns [`TracingError::InvalidLevel`] for an unknown tag.
    pub fn level_filter(&self) -> Result<LevelFilter, TracingError> {
        let level = match self.log_level.to_ascii_lowercase().as_str() {
            "panic" | "fatal" | "error" => LevelFilter::ERROR,
            "warn" | "warning" => LevelFilter::WARN,
            "info" => LevelFilter::INFO,
            "debug" => LevelFilter::DEBUG,
            "trace" => LevelFilter::TRACE,
            "off" => LevelFilter::OFF,
            _ => return Err(TracingError::InvalidLevel(self.log_level.clone())),
        };
        Ok(level)
    }
}

/// Install the global tracing subscriber.
///
/// Should be called once at application startup.
///
/// # Errors
///
/// Fails on an unknown level tag or when a subscriber is already installed.
pub fn init_tracing(config: &TracingConfig) -> Result<(), TracingError> {
    let level = config.level_filter()?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
        LogFormat::Logfmt => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_ansi(false))
            .try_init()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TracingConfig::default();
        assert_eq!(config.log_level, "INFO");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_config_builder() {
        let config = TracingConfig::default()
            .with_log_level("DEBUG")
            .with_format(LogFormat::Logfmt);

        assert_eq!(config.log_level, "DEBUG");
        assert_eq!(config.format, LogFormat::Logfmt);
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("LOGFMT".parse::<LogFormat>(), Ok(LogFormat::Logfmt));
        assert!("json".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Logfmt.to_string(), "LOGFMT");
    }

    #[test]
    fn test_level_filter() {
        let level = |tag: &str| TracingConfig::default().with_log_level(tag).level_filter();

        assert_eq!(level("INFO").ok(), Some(LevelFilter::INFO));
        assert_eq!(level("debug").ok(), Some(LevelFilter::DEBUG));
        assert_eq!(level("WARNING").ok(), Some(LevelFilter::WARN));
        assert_eq!(level("FATAL").ok(), Some(LevelFilter::ERROR));
        assert!(matches!(level("LOUD"), Err(TracingError::InvalidLevel(_))));
    }
}
