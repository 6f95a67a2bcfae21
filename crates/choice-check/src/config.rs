//! Checker configuration parsed from environment variables.
//!
//! Settings can be overridden via environment variables prefixed with
//! `CHOICE_CHECK_`; command line flags take precedence over both.

use std::env;
use std::str::FromStr;

use crate::error::CheckError;

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so that only problems reach stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum LogLevel {
    /// Every parse, including successful ones.
    Trace,
    /// Rejection reasons from the grammar.
    Debug,
    /// Progress messages.
    Info,
    /// Rejected and unresolved expressions.
    #[default]
    Warn,
    /// Failures that stop the checker.
    Error,
}

impl FromStr for LogLevel {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CheckError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub(crate) fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Runtime settings for the checker.
///
/// # Environment Variables
///
/// - `CHOICE_CHECK_LOG_LEVEL`: Sets the log level (trace, debug, info, warn,
///   error)
#[derive(Debug, Clone, Default)]
pub(crate) struct CheckConfig {
    /// Log level (trace, debug, info, warn, error).
    pub(crate) log_level: LogLevel,
}

impl CheckConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::InvalidConfig` if an environment variable contains
    /// an invalid value.
    pub(crate) fn from_env() -> Result<Self, CheckError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, CheckError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = match lookup("CHOICE_CHECK_LOG_LEVEL") {
            Some(val) => val.parse()?,
            None => LogLevel::default(),
        };
        Ok(Self { log_level })
    }

    /// Apply optional overrides from the command line.
    #[must_use]
    pub(crate) fn apply_overrides(mut self, log_level: Option<LogLevel>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub(crate) fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}
