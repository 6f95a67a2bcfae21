//! Errors raised while loading the checker's inputs.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the checker before any expression is examined.
#[derive(Debug, Error)]
pub(crate) enum CheckError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The policy file is not a valid choice configuration.
    #[error("invalid policy file {}: {source}", path.display())]
    Policy {
        /// Policy file.
        path: PathBuf,
        /// Underlying JSON failure.
        source: serde_json::Error,
    },

    /// A reference line names a class but no object.
    #[error("{}:{line}: reference line has an empty class or name", path.display())]
    Reference {
        /// References file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_error_displays_message() {
        let error = CheckError::InvalidConfig("unknown log level".to_string());
        assert_eq!(error.to_string(), "invalid configuration: unknown log level");
    }

    #[test]
    fn reference_error_names_file_and_line() {
        let error = CheckError::Reference {
            path: PathBuf::from("refs.txt"),
            line: 4,
        };
        assert_eq!(
            error.to_string(),
            "refs.txt:4: reference line has an empty class or name"
        );
    }

    #[test]
    fn io_error_names_the_file() {
        let error = CheckError::Io {
            path: PathBuf::from("missing.choices"),
            source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
        };
        assert_eq!(
            error.to_string(),
            "failed to read missing.choices: file not found"
        );
    }
}
