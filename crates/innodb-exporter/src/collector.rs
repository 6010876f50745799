//! Cluster collector.
//!
//! Owns every metric derived from a scrape behind one read/write lock. Each
//! `collect` call runs the probe with the lock held for write, so concurrent
//! scrapes queue up behind each other instead of spawning parallel shells.
//! A failed probe only drops `up` to 0; the status gauges keep their last
//! successfully scraped value.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{Gauge, IntCounter, Opts};

use innodb_exporter_core::error::{ExporterError, Result};
use innodb_exporter_core::status::ClusterReport;
use innodb_exporter_core::{MetricDescriptor, NAMESPACE};

use crate::probe::Probe;

struct StatusGauge {
    desc: MetricDescriptor,
    gauge: Gauge,
}

struct ScrapeState {
    up: Gauge,
    total_scrapes: IntCounter,
    gauges: Vec<StatusGauge>,
}

impl ScrapeState {
    fn scrape(&self, probe: &dyn Probe) {
        self.total_scrapes.inc();

        match probe.fetch() {
            Ok(body) => {
                self.up.set(1.0);
                self.apply(&body);
            }
            Err(e) => {
                self.up.set(0.0);
                tracing::error!(kind = e.kind().as_str(), error = %e, "can't scrape MySQL");
            }
        }
    }

    fn apply(&self, body: &[u8]) {
        let report = ClusterReport::parse(body);
        for g in &self.gauges {
            let value = report.value_of(&g.desc);
            g.gauge.set(value);
            tracing::debug!(metric = g.desc.name, value, "status gauge updated");
        }
    }

    fn families(&self) -> Vec<MetricFamily> {
        let mut out = self.up.collect();
        out.extend(self.total_scrapes.collect());
        for g in &self.gauges {
            out.extend(g.gauge.collect());
        }
        out
    }
}

pub struct ClusterCollector {
    descs: Vec<Desc>,
    probe: Box<dyn Probe>,
    state: RwLock<ScrapeState>,
}

impl ClusterCollector {
    /// Build gauges for the enabled registry entries.
    pub fn new(metrics: &[MetricDescriptor], probe: Box<dyn Probe>) -> Result<Self> {
        let up = Gauge::with_opts(
            Opts::new("up", "Was the last scrape of MySQL successful.").namespace(NAMESPACE),
        )
        .map_err(metrics_err)?;
        let total_scrapes = IntCounter::with_opts(
            Opts::new("exporter_total_scrapes", "Current total MySQL scrapes.")
                .namespace(NAMESPACE),
        )
        .map_err(metrics_err)?;

        let gauges = metrics
            .iter()
            .map(|desc| {
                Gauge::with_opts(Opts::new(desc.name, desc.help).namespace(NAMESPACE))
                    .map(|gauge| StatusGauge { desc: *desc, gauge })
                    .map_err(metrics_err)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut descs: Vec<Desc> = up.desc().into_iter().cloned().collect();
        descs.extend(total_scrapes.desc().into_iter().cloned());
        for g in &gauges {
            descs.extend(g.gauge.desc().into_iter().cloned());
        }

        Ok(Self {
            descs,
            probe,
            state: RwLock::new(ScrapeState {
                up,
                total_scrapes,
                gauges,
            }),
        })
    }

    /// Parse shell output and update the status gauges without probing.
    /// `up` and the scrape counter are left alone.
    pub fn apply_output(&self, body: &[u8]) {
        self.write().apply(body);
    }

    /// Current metric families without running a scrape.
    pub fn snapshot(&self) -> Vec<MetricFamily> {
        self.read().families()
    }

    // Gauges are atomics, so state left behind by a panicking scrape is still usable.
    fn write(&self) -> RwLockWriteGuard<'_, ScrapeState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> RwLockReadGuard<'_, ScrapeState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Collector for ClusterCollector {
    fn desc(&self) -> Vec<&Desc> {
        self.descs.iter().collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let state = self.write();
        state.scrape(self.probe.as_ref());
        state.families()
    }
}

pub(crate) fn metrics_err(e: prometheus::Error) -> ExporterError {
    ExporterError::Metrics(e.to_string())
}
