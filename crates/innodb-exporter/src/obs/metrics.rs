//! Exporter metrics registry.
//!
//! Holds the `prometheus` registry the `/metrics` handler gathers from: the
//! cluster collector plus a constant build-info gauge. Rendering triggers a
//! scrape, so it blocks for as long as the shell runs.

use prometheus::{Encoder, IntGaugeVec, Opts, Registry, TextEncoder};

use innodb_exporter_core::error::{ExporterError, Result};
use innodb_exporter_core::NAMESPACE;

use crate::collector::{metrics_err, ClusterCollector};

pub struct ExporterMetrics {
    registry: Registry,
}

impl ExporterMetrics {
    pub fn new(collector: ClusterCollector) -> Result<Self> {
        let registry = Registry::new();

        let build_info = IntGaugeVec::new(
            Opts::new("build_info", "Build information of the exporter.").namespace(NAMESPACE),
            &["version"],
        )
        .map_err(metrics_err)?;
        build_info
            .with_label_values(&[env!("CARGO_PKG_VERSION")])
            .set(1);

        registry.register(Box::new(build_info)).map_err(metrics_err)?;
        registry.register(Box::new(collector)).map_err(metrics_err)?;

        Ok(Self { registry })
    }

    /// Run one scrape and encode every family in the text exposition format.
    pub fn render(&self) -> Result<String> {
        let families = self.registry.gather();
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(&families, &mut buf)
            .map_err(metrics_err)?;
        String::from_utf8(buf).map_err(|e| ExporterError::Internal(format!("non-utf8 exposition: {e}")))
    }
}
