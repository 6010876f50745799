//! Observability: metrics registry and log setup.

pub mod metrics;

use tracing_subscriber::{fmt, EnvFilter};

use innodb_exporter_core::error::{ExporterError, Result};

use crate::config::{LogFormat, LogLevel};

/// Install the global fmt subscriber. `RUST_LOG` wins over `level`.
pub fn init_tracing(level: LogLevel, format: LogFormat) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let builder = fmt().with_env_filter(filter).with_target(true);

    match format {
        LogFormat::Logfmt => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| ExporterError::Internal(format!("tracing init failed: {e}")))
}
