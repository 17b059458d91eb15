//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Only [`ConfigError`]
//! ever reaches a caller of the scan API; [`ProbeError`] is absorbed inside
//! the prober and turned into a closed-port outcome.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid scan configuration or settings.
///
/// Raised before any probe is sent.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("port must be a valid number, got '{0}'")]
    InvalidPortNumber(String),

    #[error("port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u64),

    #[error("invalid port range: start ({start}) > end ({end})")]
    InvalidRange { start: u16, end: u16 },

    #[error("target host must not be empty")]
    EmptyHost,

    #[error("connect timeout must be greater than zero")]
    ZeroTimeout,

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("failed to resolve host '{host}': {reason}")]
    UnresolvableHost { host: String, reason: String },

    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),
}

/// Result type alias for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Why a single connect attempt did not produce an open port.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("connection refused")]
    ConnectionRefused,

    #[error("connection timed out")]
    Timeout,

    #[error("unreachable: {0}")]
    Unreachable(String),

    #[error("connection failed: {0}")]
    ConnectionFailed(#[from] std::io::Error),
}
