//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::synthetic_adapter::SyntheticAdapter;
use crate::domain::config_validation::{
    resolve_data_source, resolve_date_range, validate_data_config, validate_report_config,
    DataSource,
};
use crate::domain::error::TrackerError;
use crate::domain::summary::Summary;
use crate::domain::tracker::{self, TrackerResult};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_REPORT_PATH: &str = "report.html";

#[derive(Parser, Debug)]
#[command(name = "regtrack", about = "Regulatory ratio compliance tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute ratios and compliance, print a summary and write reports
    Run {
        #[arg(short, long)]
        config: PathBuf,
        /// HTML report path (overrides [report] output)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// CSV export path (overrides [report] export)
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Write the synthetic dataset as CSV
    Generate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Run {
            config,
            output,
            export,
        } => run_tracker(&config, output.as_deref(), export.as_deref()),
        Command::Generate { config, output } => run_generate(&config, &output),
        Command::Validate { config } => run_validate(&config),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, TrackerError> {
    tracing::info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| TrackerError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), TrackerError> {
    validate_data_config(config)?;
    validate_report_config(config)?;
    if resolve_data_source(config)? == DataSource::Synthetic {
        SyntheticAdapter::from_config(config)?;
    }
    Ok(())
}

pub fn build_data_port(config: &dyn ConfigPort) -> Result<Box<dyn DataPort>, TrackerError> {
    match resolve_data_source(config)? {
        DataSource::Synthetic => Ok(Box::new(SyntheticAdapter::from_config(config)?)),
        DataSource::Csv { path } => Ok(Box::new(CsvAdapter::new(PathBuf::from(path)))),
    }
}

/// CLI flag first, then `[report] <key>`, then the fallback.
pub fn resolve_report_path(
    flag: Option<&Path>,
    config: &dyn ConfigPort,
    key: &str,
    fallback: Option<&str>,
) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| config.get_string("report", key).map(PathBuf::from))
        .or_else(|| fallback.map(PathBuf::from))
}

fn run_tracker(
    config_path: &Path,
    output_flag: Option<&Path>,
    export_flag: Option<&Path>,
) -> Result<(), TrackerError> {
    let config = load_config(config_path)?;
    validate_config(&config)?;

    let data_port = build_data_port(&config)?;
    let (start_date, end_date) = resolve_date_range(&config)?;
    let output = resolve_report_path(output_flag, &config, "output", Some(DEFAULT_REPORT_PATH));
    let export = resolve_report_path(export_flag, &config, "export", None);

    let (_, summary) = run_pipeline(
        data_port.as_ref(),
        start_date,
        end_date,
        output.as_deref(),
        export.as_deref(),
    )?;

    print!("{}", summary.render_text());
    Ok(())
}

/// Fetch, evaluate and report. Stops at the first error.
pub fn run_pipeline(
    data_port: &dyn DataPort,
    start_date: chrono::NaiveDate,
    end_date: chrono::NaiveDate,
    output: Option<&Path>,
    export: Option<&Path>,
) -> Result<(TrackerResult, Summary), TrackerError> {
    tracing::info!("Fetching periods from {} to {}", start_date, end_date);
    let periods = data_port.fetch_periods(start_date, end_date)?;
    tracing::info!("Evaluating {} periods", periods.len());

    let result = tracker::run(&periods)?;
    let summary = Summary::compute(&result)?;

    if let Some(path) = output {
        write_html_report(&result, &summary, path)?;
        tracing::info!("Report written to: {}", path.display());
    }
    if let Some(path) = export {
        CsvReportAdapter::new().write(&result, &summary, &path.to_string_lossy())?;
        tracing::info!("Export written to: {}", path.display());
    }

    Ok((result, summary))
}

#[cfg(feature = "html")]
fn write_html_report(
    result: &TrackerResult,
    summary: &Summary,
    path: &Path,
) -> Result<(), TrackerError> {
    use crate::adapters::html_report_adapter::HtmlReportAdapter;

    HtmlReportAdapter::new().write(result, summary, &path.to_string_lossy())
}

#[cfg(not(feature = "html"))]
fn write_html_report(
    _result: &TrackerResult,
    _summary: &Summary,
    _path: &Path,
) -> Result<(), TrackerError> {
    Err(TrackerError::Report {
        reason: "html feature is required for report output".to_string(),
    })
}

fn run_generate(config_path: &Path, output: &Path) -> Result<(), TrackerError> {
    let config = load_config(config_path)?;
    validate_data_config(&config)?;

    let (start_date, end_date) = resolve_date_range(&config)?;
    let periods = SyntheticAdapter::from_config(&config)?.fetch_periods(start_date, end_date)?;
    CsvAdapter::new(output.to_path_buf()).write_periods(&periods)?;

    tracing::info!("Wrote {} periods to {}", periods.len(), output.display());
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), TrackerError> {
    let config = load_config(config_path)?;
    validate_config(&config)?;

    let source = match resolve_data_source(&config)? {
        DataSource::Synthetic => "synthetic".to_string(),
        DataSource::Csv { path } => format!("csv ({path})"),
    };
    let (start_date, end_date) = resolve_date_range(&config)?;
    println!("source: {source}");
    println!("window: {start_date} to {end_date}");
    println!("Configuration is valid.");
    Ok(())
}
