//! Shared error type across the exporter crates.

use thiserror::Error;

/// Coarse error classification (stable, used as a log field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid flags or environment.
    Config,
    /// The shell binary could not be started.
    ProbeLaunch,
    /// The shell ran but exited unsuccessfully.
    ProbeFailed,
    /// Metric construction, registration or encoding failed.
    Metrics,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "CONFIG",
            ErrorKind::ProbeLaunch => "PROBE_LAUNCH",
            ErrorKind::ProbeFailed => "PROBE_FAILED",
            ErrorKind::Metrics => "METRICS",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("config: {0}")]
    Config(String),
    #[error("probe launch failed: {0}")]
    ProbeLaunch(String),
    #[error("probe exited with {status}: {stderr}")]
    ProbeFailed { status: String, stderr: String },
    #[error("metrics: {0}")]
    Metrics(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ExporterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExporterError::Config(_) => ErrorKind::Config,
            ExporterError::ProbeLaunch(_) => ErrorKind::ProbeLaunch,
            ExporterError::ProbeFailed { .. } => ErrorKind::ProbeFailed,
            ExporterError::Metrics(_) => ErrorKind::Metrics,
            ExporterError::Internal(_) => ErrorKind::Internal,
        }
    }
}
