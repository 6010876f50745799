//! Shared application state for the exporter.
//!
//! Built once at startup from the resolved config; handlers only read it.

use std::sync::Arc;

use innodb_exporter_core::error::Result;

use crate::collector::ClusterCollector;
use crate::config::ExporterConfig;
use crate::obs::metrics::ExporterMetrics;
use crate::ops;
use crate::probe::{MysqlShell, Probe};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<ExporterMetrics>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    landing_page: String,
}

impl AppState {
    /// Build state backed by the configured MySQL Shell.
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let probe = MysqlShell::new(cfg.mysqlsh_path.clone(), cfg.connection_string.clone());
        Self::with_probe(cfg, Box::new(probe))
    }

    /// Build state around an arbitrary probe.
    pub fn with_probe(cfg: ExporterConfig, probe: Box<dyn Probe>) -> Result<Self> {
        let collector = ClusterCollector::new(&cfg.metrics, probe)?;
        let metrics = ExporterMetrics::new(collector)?;
        let landing_page = ops::landing_page(&cfg.telemetry_path);

        for m in &cfg.metrics {
            tracing::info!(metric = m.name, "collector enabled");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, landing_page }),
            metrics: Arc::new(metrics),
        })
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn landing_page(&self) -> &str {
        &self.inner.landing_page
    }

    pub fn metrics(&self) -> Arc<ExporterMetrics> {
        Arc::clone(&self.metrics)
    }
}
