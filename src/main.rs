mod chart;
mod config;
mod dataset;
mod mailer;
mod perfdata;
mod pipeline;
mod spreadsheet;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "perfdata-report",
    version,
    about = "Chart Nagios temperature perfdata, export it to a spreadsheet and mail both"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c')]
    config: PathBuf,
}

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_json_logging();

    match pipeline::run(&cli.config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("report_run_failed stage={} error={}", error.stage(), error);
            ExitCode::FAILURE
        }
    }
}
