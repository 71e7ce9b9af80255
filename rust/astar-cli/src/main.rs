use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use astar_cli::config::Config;
use astar_cli::{run, write_report, Args};

fn main() -> Result<()> {
    let cfg = Config::from_env();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so stdout carries only the report
    if cfg.log_json {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).json().init();
    } else {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }
    tracing::debug!(core_version = astar_core::version(), "starting astar");

    let args = Args::parse();
    let report = match run(&args, &cfg) {
        Ok(r) => r,
        Err(e) => {
            error!(error=%format!("{e:#}"), "search aborted");
            return Err(e);
        }
    };
    write_report(&report, args.out.as_deref(), args.pretty)
}
