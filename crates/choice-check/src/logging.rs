//! Structured logging for the checker.
//!
//! Logs go to stderr so that reports on stdout stay machine readable. Records
//! emitted by the grammar through the `log` facade are forwarded to the same
//! subscriber.

use tracing_subscriber::EnvFilter;

use crate::config::CheckConfig;

fn filter_from_config(config: &CheckConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level`
/// 2. `CHOICE_CHECK_LOG_LEVEL`
/// 3. Default configuration value
///
/// A subscriber that is already installed wins; later calls are ignored.
pub(crate) fn init_logging(config: &CheckConfig) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
    if result.is_err() {
        tracing::trace!("logging already initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn init_logging_is_idempotent() {
        let config = CheckConfig::default();
        init_logging(&config);
        init_logging(&config);
    }

    #[test]
    fn filter_uses_config_log_level() {
        let config = CheckConfig::default().with_log_level(LogLevel::Debug);
        assert_eq!(filter_from_config(&config).to_string(), "debug");
    }
}
