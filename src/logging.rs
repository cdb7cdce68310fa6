//! Tracing setup for the CLI
//!
//! Diagnostics always go to stderr; stdout is reserved for results.

use std::io;

pub use tracing::Level;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Result, VersionManagerError};

/// Environment variable holding a full filter directive
pub const LOG_ENV: &str = "VERSION_MANAGER_LOG";

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogLevel {
    /// Show all logs (trace level)
    Trace,
    /// Show debug and above
    Debug,
    /// Show info and above
    Info,
    /// Show warnings and above (default)
    #[default]
    Warn,
    /// Show errors only
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Filter directive for a level, scoped to this crate
pub fn directive(level: LogLevel) -> String {
    let level = Level::from(level).as_str().to_lowercase();
    format!("version_manager={level}")
}

/// Build the filter: `VERSION_MANAGER_LOG` wins over the CLI level
pub fn build_filter(env_value: Option<&str>, level: LogLevel) -> Result<EnvFilter> {
    let directives = match env_value {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => directive(level),
    };

    EnvFilter::try_new(&directives).map_err(|e| {
        VersionManagerError::config(format!("Invalid log filter '{directives}': {e}"))
    })
}

/// Install the global subscriber
pub fn init_tracing(level: LogLevel) -> Result<()> {
    let env_value = std::env::var(LOG_ENV).ok();
    let filter = build_filter(env_value.as_deref(), level)?;

    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| VersionManagerError::config(format!("Cannot install logger: {e}")))?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_per_level() {
        assert_eq!(directive(LogLevel::Warn), "version_manager=warn");
        assert_eq!(directive(LogLevel::Trace), "version_manager=trace");
        assert_eq!(LogLevel::default(), LogLevel::Warn);
    }

    #[test]
    fn test_env_filter_overrides_level() {
        let filter = build_filter(Some("version_manager=debug"), LogLevel::Error).unwrap();
        assert_eq!(filter.to_string(), "version_manager=debug");
    }

    #[test]
    fn test_blank_env_falls_back_to_level() {
        let filter = build_filter(Some("  "), LogLevel::Info).unwrap();
        assert_eq!(filter.to_string(), "version_manager=info");
    }

    #[test]
    fn test_invalid_filter_is_config_error() {
        let err = build_filter(Some("version_manager=notalevel"), LogLevel::Warn).unwrap_err();
        assert!(matches!(err, VersionManagerError::Config(_)));
    }
}
