//! Runs the built binary and talks to it over HTTP.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::net::{SocketAddr, TcpListener};
use std::process::{Child, Command, Stdio};
use std::thread::sleep;
use std::time::Duration;

use common::{http_get, HttpResponse};

const BIN: &str = env!("CARGO_BIN_EXE_mysql_innodb_cluster_exporter");

const LANDING: &str = "<html>
<head><title>MySQL InnoDB Cluster Exporter</title></head>
<body>
<h1>MySQL InnoDB Cluster Exporter</h1>
<p><a href='/metrics'>Metrics</a></p>
</body>
</html>";

struct Exporter {
    child: Child,
    addr: SocketAddr,
}

impl Drop for Exporter {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn free_addr() -> SocketAddr {
    TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap()
}

fn start(extra: &[&str]) -> Exporter {
    let addr = free_addr();
    let child = Command::new(BIN)
        .args(["--web.listen-address", &addr.to_string()])
        .args(extra)
        .env("MYSQL_CONNECTION_STRING", "127.0.0.1:3306")
        .env_remove("RUST_LOG")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    Exporter { child, addr }
}

/// Retry while the server is not accepting connections yet.
fn wait_for(addr: SocketAddr, path: &str) -> HttpResponse {
    let mut last = None;
    for _ in 0..60 {
        match http_get(addr, path) {
            Ok(resp) => return resp,
            Err(e) => last = Some(e),
        }
        sleep(Duration::from_millis(250));
    }
    panic!("failed to GET {path} from {addr}: {last:?}");
}

#[test]
fn landing_page() {
    let exporter = start(&[]);
    let resp = wait_for(exporter.addr, "/");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, LANDING);
}

#[cfg(unix)]
#[test]
fn failing_shell_reports_down() {
    let exporter = start(&["--mysqlsh.path", "false"]);
    let resp = wait_for(exporter.addr, "/metrics");
    assert_eq!(resp.status, 200);
    assert!(resp.body.contains("mysql_innodb_cluster_exporter_up 0\n"));
    assert!(resp
        .body
        .contains("mysql_innodb_cluster_exporter_exporter_total_scrapes 1\n"));
    assert!(resp
        .body
        .contains("mysql_innodb_cluster_exporter_default_replica_set_status 0\n"));
}

#[test]
fn missing_connection_string_exits() {
    let status = Command::new(BIN)
        .args(["--web.listen-address", &free_addr().to_string()])
        .env_remove("MYSQL_CONNECTION_STRING")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .unwrap();
    assert!(!status.success());
}
