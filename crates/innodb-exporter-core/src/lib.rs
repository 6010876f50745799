//! InnoDB Cluster exporter core: error type, metric registry and result parsing.
//!
//! This crate knows nothing about HTTP, processes or the Prometheus client. It
//! describes which metrics exist and how a `mysqlsh` cluster status document
//! turns into gauge values, so the exporter crate and tests can share it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Malformed shell
//! output degrades to zero-valued gauges instead of crashing a scrape.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod registry;
pub mod status;

/// Shared result type.
pub use error::{Result, ExporterError};
pub use registry::{MetricDescriptor, NAMESPACE};
