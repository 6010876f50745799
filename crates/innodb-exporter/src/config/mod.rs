//! Exporter config loader (command line + environment).
//!
//! Fixed flags come from the `Cli` derive; one `--collect.<name>` boolean is
//! added per registry entry so new metrics get a toggle for free.

pub mod schema;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{
    value_parser, Arg, ArgAction, ArgMatches, Command, CommandFactory, FromArgMatches, Parser,
};

use innodb_exporter_core::error::{ExporterError, Result};
use innodb_exporter_core::{registry, MetricDescriptor};

pub use schema::{parse_listen_address, ExporterConfig, LogFormat, LogLevel};

/// Environment variable holding the `mysqlsh --uri` target.
pub const CONNECTION_ENV: &str = "MYSQL_CONNECTION_STRING";

#[derive(Debug, Parser)]
#[command(
    name = "mysql_innodb_cluster_exporter",
    version,
    about = "Prometheus exporter for MySQL InnoDB Cluster status"
)]
pub struct Cli {
    /// Address to listen on for web interface and telemetry.
    #[arg(long = "web.listen-address", default_value = ":9105")]
    pub listen_address: String,

    /// Path under which to expose metrics.
    #[arg(long = "web.telemetry-path", default_value = "/metrics")]
    pub telemetry_path: String,

    /// MySQL Shell binary used to query the cluster.
    #[arg(long = "mysqlsh.path", default_value = "mysqlsh")]
    pub mysqlsh_path: PathBuf,

    /// Connection string passed to `mysqlsh --uri`.
    #[arg(
        long = "mysql.connection-string",
        env = CONNECTION_ENV,
        hide_env_values = true
    )]
    pub connection_string: Option<String>,

    /// Minimum log level, used when RUST_LOG is not set.
    #[arg(long = "log.level", value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Output format of log lines.
    #[arg(long = "log.format", value_enum, default_value = "logfmt")]
    pub log_format: LogFormat,
}

fn collect_arg(desc: &MetricDescriptor) -> Arg {
    Arg::new(desc.flag())
        .long(desc.flag())
        .help(desc.help)
        .value_parser(value_parser!(bool))
        .num_args(0..=1)
        .require_equals(true)
        .default_value(if desc.default_enabled { "true" } else { "false" })
        .default_missing_value("true")
}

fn negated_id(desc: &MetricDescriptor) -> String {
    format!("no-{}", desc.flag())
}

// `--no-collect.<name>`, the negated form older deployments pass.
fn no_collect_arg(desc: &MetricDescriptor) -> Arg {
    Arg::new(negated_id(desc))
        .long(negated_id(desc))
        .action(ArgAction::SetFalse)
        .hide(true)
}

/// Full command: fixed flags plus one toggle per registry entry.
pub fn command() -> Command {
    registry::all().iter().fold(Cli::command(), |cmd, desc| {
        cmd.arg(collect_arg(desc)).arg(no_collect_arg(desc))
    })
}

fn is_enabled(matches: &ArgMatches, desc: &MetricDescriptor) -> bool {
    let collect = matches
        .get_one::<bool>(&desc.flag())
        .copied()
        .unwrap_or(desc.default_enabled);
    let not_negated = matches
        .get_one::<bool>(&negated_id(desc))
        .copied()
        .unwrap_or(true);
    collect && not_negated
}

pub fn load_from_matches(matches: &ArgMatches) -> Result<ExporterConfig> {
    let cli = Cli::from_arg_matches(matches)
        .map_err(|e| ExporterError::Config(e.to_string()))?;

    let metrics = registry::all()
        .iter()
        .filter(|desc| is_enabled(matches, desc))
        .copied()
        .collect();

    let connection_string = cli
        .connection_string
        .ok_or_else(|| ExporterError::Config(format!("{CONNECTION_ENV} not set")))?;

    let cfg = ExporterConfig {
        listen: parse_listen_address(&cli.listen_address)?,
        telemetry_path: cli.telemetry_path,
        metrics,
        mysqlsh_path: cli.mysqlsh_path,
        connection_string,
        log_level: cli.log_level,
        log_format: cli.log_format,
    };
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_args<I, T>(args: I) -> Result<ExporterConfig>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command()
        .try_get_matches_from(args)
        .map_err(|e| ExporterError::Config(e.to_string()))?;
    load_from_matches(&matches)
}
