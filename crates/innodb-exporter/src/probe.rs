//! Probe invocation: run MySQL Shell and capture the cluster status document.
//!
//! The child process is blocking and has no timeout; a hung shell holds the
//! scrape (and the HTTP response) until the OS lets it finish.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;

use innodb_exporter_core::error::{ExporterError, Result};

/// Source of raw cluster status output.
pub trait Probe: Send + Sync {
    fn fetch(&self) -> Result<Vec<u8>>;
}

/// `mysqlsh --uri <target> --result-format=json/raw -- cluster status`
pub struct MysqlShell {
    program: PathBuf,
    connection_string: String,
}

impl MysqlShell {
    pub fn new(program: impl Into<PathBuf>, connection_string: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            connection_string: connection_string.into(),
        }
    }

    /// Fixed argument list; only the connection target varies.
    pub fn args(&self) -> [&str; 6] {
        [
            "--uri",
            &self.connection_string,
            "--result-format=json/raw",
            "--",
            "cluster",
            "status",
        ]
    }
}

impl Probe for MysqlShell {
    fn fetch(&self) -> Result<Vec<u8>> {
        let started = Instant::now();
        let output = Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ExporterError::ProbeLaunch(format!("{}: {e}", self.program.display())))?;

        tracing::debug!(
            program = %self.program.display(),
            status = %output.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            stdout_len = output.stdout.len(),
            "mysqlsh finished"
        );

        if !output.status.success() {
            return Err(ExporterError::ProbeFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}
