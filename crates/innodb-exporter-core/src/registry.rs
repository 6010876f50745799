//! Static metric registry.
//!
//! Every gauge the exporter can publish is listed here once. The table is
//! immutable; the exporter filters it by `--collect.<name>` flags at startup
//! and hands the selection to the collector.

/// Prefix shared by every exported metric name.
pub const NAMESPACE: &str = "mysql_innodb_cluster_exporter";

/// One gauge derived from the cluster status document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDescriptor {
    /// Metric name without namespace (also the `--collect.<name>` suffix).
    pub name: &'static str,
    /// Help text for the exposition format and the CLI.
    pub help: &'static str,
    /// Whether the metric is collected unless disabled by flag.
    pub default_enabled: bool,
    /// JSON Pointer of the status field the gauge is derived from.
    pub pointer: &'static str,
}

impl MetricDescriptor {
    /// Fully-qualified metric name.
    pub fn fq_name(&self) -> String {
        format!("{NAMESPACE}_{}", self.name)
    }

    /// Long flag toggling this metric.
    pub fn flag(&self) -> String {
        format!("collect.{}", self.name)
    }
}

const ALL: &[MetricDescriptor] = &[MetricDescriptor {
    name: "default_replica_set_status",
    help: "Status of the default replica set (1 = OK, 0 = not OK).",
    default_enabled: true,
    pointer: "/defaultReplicaSet/status",
}];

/// The full registry.
pub fn all() -> &'static [MetricDescriptor] {
    ALL
}

/// Lookup by short name.
pub fn find(name: &str) -> Option<&'static MetricDescriptor> {
    ALL.iter().find(|d| d.name == name)
}
