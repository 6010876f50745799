use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

use clap::ValueEnum;

use innodb_exporter_core::error::{ExporterError, Result};
use innodb_exporter_core::MetricDescriptor;

/// Resolved exporter configuration.
pub struct ExporterConfig {
    pub listen: SocketAddr,
    pub telemetry_path: String,
    /// Registry entries left enabled by `--collect.<name>` flags.
    pub metrics: Vec<MetricDescriptor>,
    pub mysqlsh_path: PathBuf,
    pub connection_string: String,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
}

/// Accepted `--log.level` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// `key=value` text lines.
    Logfmt,
    /// One JSON object per line.
    Json,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.telemetry_path.starts_with('/') {
            return Err(ExporterError::Config(
                "web.telemetry-path must start with '/'".into(),
            ));
        }
        if self.telemetry_path == "/" {
            return Err(ExporterError::Config(
                "web.telemetry-path must not be the landing page path '/'".into(),
            ));
        }
        if self.connection_string.trim().is_empty() {
            return Err(ExporterError::Config("MYSQL_CONNECTION_STRING not set".into()));
        }
        if self.mysqlsh_path.as_os_str().is_empty() {
            return Err(ExporterError::Config("mysqlsh.path must not be empty".into()));
        }
        Ok(())
    }
}

// Keeps the connection string (it usually embeds a password) out of logs.
impl fmt::Debug for ExporterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExporterConfig")
            .field("listen", &self.listen)
            .field("telemetry_path", &self.telemetry_path)
            .field("metrics", &self.metrics.iter().map(|m| m.name).collect::<Vec<_>>())
            .field("mysqlsh_path", &self.mysqlsh_path)
            .field("connection_string", &"<redacted>")
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}

/// Parse a listen address. A bare `:port` binds every interface, IPv6 and
/// IPv4 alike (the `[::]` socket is dual-stack on Linux).
pub fn parse_listen_address(s: &str) -> Result<SocketAddr> {
    let candidate = if s.starts_with(':') {
        format!("[::]{s}")
    } else {
        s.to_string()
    };
    candidate
        .to_socket_addrs()
        .map_err(|e| ExporterError::Config(format!("invalid web.listen-address {s:?}: {e}")))?
        .next()
        .ok_or_else(|| ExporterError::Config(format!("web.listen-address {s:?} resolved to nothing")))
}
