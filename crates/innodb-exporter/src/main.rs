//! mysql_innodb_cluster_exporter
//!
//! Publishes the health of a MySQL InnoDB Cluster, as reported by
//! `mysqlsh ... -- cluster status`, in the Prometheus text format.
//! A missing `MYSQL_CONNECTION_STRING` is fatal at startup.

use tokio::net::TcpListener;

use innodb_exporter::config::{ExporterConfig, LogFormat, LogLevel};
use innodb_exporter::{app_state, config, obs, router};
use innodb_exporter_core::error::{ExporterError, Result};

#[tokio::main]
async fn main() {
    let matches = config::command().get_matches();

    let cfg = match config::load_from_matches(&matches) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Config is unusable, so log with defaults before exiting.
            let _ = obs::init_tracing(LogLevel::Info, LogFormat::Logfmt);
            fatal(e);
        }
    };

    if let Err(e) = obs::init_tracing(cfg.log_level, cfg.log_format) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting mysql_innodb_cluster_exporter"
    );

    if let Err(e) = run(cfg).await {
        fatal(e);
    }
}

fn fatal(e: ExporterError) -> ! {
    tracing::error!(kind = e.kind().as_str(), error = %e, "exporter stopped");
    std::process::exit(1);
}

async fn run(cfg: ExporterConfig) -> Result<()> {
    let listen = cfg.listen;
    tracing::debug!(?cfg, "config loaded");

    let state = app_state::AppState::new(cfg)?;
    let telemetry_path = state.cfg().telemetry_path.clone();
    let app = router::build_router(state);

    let listener = TcpListener::bind(listen)
        .await
        .map_err(|e| ExporterError::Internal(format!("failed to bind {listen}: {e}")))?;
    tracing::info!(%listen, %telemetry_path, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ExporterError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
