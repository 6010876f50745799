//! MySQL InnoDB Cluster exporter library entry.
//!
//! Wires config, probe, collector and the HTTP front end together. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod collector;
pub mod config;
pub mod obs;
pub mod ops;
pub mod probe;
pub mod router;
