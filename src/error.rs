//! Error types for remote-exec.

use thiserror::Error;

use crate::cli::ArgsError;
use crate::config::ConfigError;

/// Main error type for remote-exec operations.
#[derive(Error, Debug)]
pub enum RemoteExecError {
    /// The child process could not be started.
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on a running child failed.
    #[error("failed to wait for child process: {0}")]
    Wait(#[source] std::io::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Command-line arguments could not be parsed.
    #[error("argument error: {0}")]
    Args(#[from] ArgsError),
}

/// Convenience Result type for remote-exec operations.
pub type Result<T> = std::result::Result<T, RemoteExecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_display() {
        let err = RemoteExecError::Spawn {
            program: "no-such-tool".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        };
        let msg = err.to_string();
        assert!(msg.contains("no-such-tool"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err: RemoteExecError = io_err.into();
        assert!(matches!(err, RemoteExecError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: RemoteExecError = ConfigError::InvalidHost("nowhere".into()).into();
        assert!(matches!(err, RemoteExecError::Config(_)));
        assert!(err.to_string().contains("nowhere"));
    }

    #[test]
    fn test_args_error_conversion() {
        let err: RemoteExecError = ArgsError::UnexpectedArgument("extra".into()).into();
        assert!(err.to_string().contains("extra"));
    }
}
