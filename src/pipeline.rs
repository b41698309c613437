use std::fs;
use std::path::Path;
use std::time::Instant;

use thiserror::Error;

use crate::chart::{render_chart, RenderError};
use crate::config::{load_config, Config, ConfigError, Paths};
use crate::dataset::TimeSeriesTable;
use crate::mailer::{send_report, DeliveryError};
use crate::perfdata::{extract_records, snapshot, ExtractionError};
use crate::spreadsheet::{write_report, WriteError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("spreadsheet error: {0}")]
    Write(#[from] WriteError),
    #[error("delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}

impl PipelineError {
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Extraction(_) => "extract",
            Self::Render(_) => "chart",
            Self::Write(_) => "spreadsheet",
            Self::Delivery(_) => "mail",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub series: usize,
    pub points: usize,
}

pub fn run(config_path: &Path) -> Result<RunSummary, PipelineError> {
    let started_at = Instant::now();
    let config = load_config(config_path)?;
    log::info!(
        "config_loaded path={} hosts={}",
        config_path.display(),
        config.hosts.len()
    );

    let summary = build_artifacts(&config)?;
    deliver(&config)?;

    if config.paths.cleanup_working_copy {
        remove_working_copy(&config.paths);
    }

    log::info!(
        "report_run_completed records={} series={} points={} elapsed_ms={}",
        summary.records,
        summary.series,
        summary.points,
        started_at.elapsed().as_millis()
    );
    Ok(summary)
}

pub(crate) fn build_artifacts(config: &Config) -> Result<RunSummary, PipelineError> {
    let copied_bytes = snapshot(&config.paths)?;
    log::info!(
        "perfdata_snapshot_taken from={} to={} bytes={} truncated_source={}",
        config.paths.original_file.display(),
        config.paths.copied_file.display(),
        copied_bytes,
        config.paths.truncate_source
    );

    let records = extract_records(&config.paths.copied_file, &config.perfdata)?;
    let record_count = records.len();
    let table = TimeSeriesTable::build(records, &config.hosts);

    if let Err(error) = render_chart(&table, &config.report, &config.paths.graph_file) {
        log::error!("chart_render_failed code={} error={}", error.code(), error);
        return Err(error.into());
    }
    write_report(&table, &config.report, &config.paths.excel_file)?;

    Ok(RunSummary {
        records: record_count,
        series: table.series().len(),
        points: table.point_count(),
    })
}

fn deliver(config: &Config) -> Result<(), DeliveryError> {
    let mut attachments = vec![
        config.paths.graph_file.as_path(),
        config.paths.excel_file.as_path(),
    ];
    if config.email.attach_raw_perfdata {
        attachments.push(config.paths.copied_file.as_path());
    }

    send_report(&config.email, &attachments)
}

fn remove_working_copy(paths: &Paths) {
    if let Err(error) = fs::remove_file(&paths.copied_file) {
        log::warn!(
            "working_copy_cleanup_failed path={} error={}",
            paths.copied_file.display(),
            error
        );
    }
}
