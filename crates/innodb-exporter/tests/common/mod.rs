//! Shared test helpers: scripted probe, metric lookup, raw HTTP GET.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use prometheus::proto::{MetricFamily, MetricType};

use innodb_exporter::config::{ExporterConfig, LogFormat, LogLevel};
use innodb_exporter::probe::Probe;
use innodb_exporter_core::error::{ExporterError, Result};
use innodb_exporter_core::registry;

pub const UP: &str = "mysql_innodb_cluster_exporter_up";
pub const TOTAL_SCRAPES: &str = "mysql_innodb_cluster_exporter_exporter_total_scrapes";
pub const REPLICA_SET_STATUS: &str = "mysql_innodb_cluster_exporter_default_replica_set_status";

pub fn load(name: &str) -> Vec<u8> {
    std::fs::read(format!("tests/vectors/{name}")).unwrap()
}

/// Probe replaying queued results; fails once the script runs out.
#[derive(Default)]
pub struct ScriptedProbe {
    script: Mutex<VecDeque<Result<Vec<u8>>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProbe {
    pub fn new(script: Vec<Result<Vec<u8>>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Probe for ScriptedProbe {
    fn fetch(&self) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ExporterError::ProbeLaunch("script exhausted".into())))
    }
}

pub fn failed() -> Result<Vec<u8>> {
    Err(ExporterError::ProbeFailed {
        status: "exit status: 1".into(),
        stderr: "Cluster.status: Unable to connect".into(),
    })
}

/// Single-sample value of a gauge or counter family.
pub fn value(families: &[MetricFamily], name: &str) -> Option<f64> {
    let family = families.iter().find(|f| f.get_name() == name)?;
    let metric = family.get_metric().first()?;
    match family.get_field_type() {
        MetricType::GAUGE => Some(metric.get_gauge().get_value()),
        MetricType::COUNTER => Some(metric.get_counter().get_value()),
        _ => None,
    }
}

pub fn test_config(telemetry_path: &str) -> ExporterConfig {
    ExporterConfig {
        listen: "127.0.0.1:0".parse().unwrap(),
        telemetry_path: telemetry_path.to_string(),
        metrics: registry::all().to_vec(),
        mysqlsh_path: PathBuf::from("mysqlsh"),
        connection_string: "root:mysql@localhost:3306".to_string(),
        log_level: LogLevel::Info,
        log_format: LogFormat::Logfmt,
    }
}

pub struct HttpResponse {
    pub status: u16,
    pub head: String,
    pub body: String,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (k, v) = line.split_once(':')?;
            k.trim().eq_ignore_ascii_case(name).then(|| v.trim())
        })
    }
}

/// Blocking HTTP/1.1 GET with `Connection: close`.
pub fn http_get(addr: SocketAddr, path: &str) -> std::io::Result<HttpResponse> {
    let mut stream = TcpStream::connect(addr)?;
    write!(
        stream,
        "GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"
    )?;
    let mut raw = String::new();
    stream.read_to_string(&mut raw)?;

    let (head, body) = raw
        .split_once("\r\n\r\n")
        .ok_or_else(|| std::io::Error::other("truncated response"))?;
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| std::io::Error::other("bad status line"))?;

    Ok(HttpResponse {
        status,
        head: head.to_string(),
        body: body.to_string(),
    })
}
