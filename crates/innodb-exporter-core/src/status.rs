//! Cluster status parsing.
//!
//! `mysqlsh ... -- cluster status` prints one JSON document. Only single fields
//! are read from it; nothing else is validated. A field whose value is the
//! string `"OK"` is healthy (1), anything else, including malformed JSON or a
//! missing field, is unhealthy (0).

use serde_json::Value;

use crate::registry::MetricDescriptor;

/// Status string reported by a healthy cluster.
pub const HEALTHY: &str = "OK";

/// A parsed status document. Malformed input parses to an empty report.
#[derive(Debug, Clone, Default)]
pub struct ClusterReport {
    doc: Option<Value>,
}

impl ClusterReport {
    pub fn parse(raw: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(raw) {
            Ok(doc) => Self { doc: Some(doc) },
            Err(e) => {
                tracing::debug!(error = %e, len = raw.len(), "cluster status is not valid json");
                Self { doc: None }
            }
        }
    }

    /// Whether the output parsed as JSON at all.
    pub fn is_valid(&self) -> bool {
        self.doc.is_some()
    }

    /// String value at `pointer`, if present and a string.
    pub fn field(&self, pointer: &str) -> Option<&str> {
        self.doc.as_ref()?.pointer(pointer)?.as_str()
    }

    /// Gauge value for `pointer`: 1.0 iff the field equals `"OK"`.
    pub fn gauge(&self, pointer: &str) -> f64 {
        match self.field(pointer) {
            Some(HEALTHY) => 1.0,
            _ => 0.0,
        }
    }

    /// Gauge value for a registry entry.
    pub fn value_of(&self, desc: &MetricDescriptor) -> f64 {
        self.gauge(desc.pointer)
    }
}

/// Extract the string at `pointer` from raw shell output.
pub fn extract_status(raw: &[u8], pointer: &str) -> Option<String> {
    ClusterReport::parse(raw).field(pointer).map(str::to_owned)
}

/// Parse raw shell output and return the gauge value at `pointer`.
pub fn health_value(raw: &[u8], pointer: &str) -> f64 {
    ClusterReport::parse(raw).gauge(pointer)
}
