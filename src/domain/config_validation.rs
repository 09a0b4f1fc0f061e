//! Configuration validation.
//!
//! Validates the `[data]` and `[report]` sections before any data is loaded.
//! Generator parameters in `[synthetic]` are checked when the synthetic
//! adapter is built from config.

use crate::domain::error::TrackerError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;
use std::fmt::Display;
use std::str::FromStr;

pub const DEFAULT_START_DATE: &str = "2023-01-01";
pub const DEFAULT_END_DATE: &str = "2024-01-01";

/// Where period records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Synthetic,
    Csv { path: String },
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), TrackerError> {
    resolve_data_source(config)?;
    resolve_date_range(config)?;
    Ok(())
}

pub fn validate_report_config(config: &dyn ConfigPort) -> Result<(), TrackerError> {
    if let Some(output) = config.get_string("report", "output") {
        if output.trim().is_empty() {
            return Err(TrackerError::ConfigInvalid {
                section: "report".to_string(),
                key: "output".to_string(),
                reason: "output must not be empty".to_string(),
            });
        }
    }
    if let Some(export) = config.get_string("report", "export") {
        if !export.trim().to_lowercase().ends_with(".csv") {
            return Err(TrackerError::ConfigInvalid {
                section: "report".to_string(),
                key: "export".to_string(),
                reason: "export must be a .csv path".to_string(),
            });
        }
    }
    Ok(())
}

pub fn resolve_data_source(config: &dyn ConfigPort) -> Result<DataSource, TrackerError> {
    let source = config
        .get_string("data", "source")
        .unwrap_or_else(|| "synthetic".to_string());

    match source.trim().to_lowercase().as_str() {
        "synthetic" => Ok(DataSource::Synthetic),
        "csv" => match config.get_string("data", "csv_path") {
            Some(path) if !path.trim().is_empty() => Ok(DataSource::Csv {
                path: path.trim().to_string(),
            }),
            _ => Err(TrackerError::ConfigMissing {
                section: "data".to_string(),
                key: "csv_path".to_string(),
            }),
        },
        other => Err(TrackerError::ConfigInvalid {
            section: "data".to_string(),
            key: "source".to_string(),
            reason: format!("unknown source '{}', expected synthetic or csv", other),
        }),
    }
}

/// Reads `[data] start_date` / `end_date`, falling back to the defaults.
pub fn resolve_date_range(
    config: &dyn ConfigPort,
) -> Result<(NaiveDate, NaiveDate), TrackerError> {
    let start_str = config
        .get_string("data", "start_date")
        .unwrap_or_else(|| DEFAULT_START_DATE.to_string());
    let end_str = config
        .get_string("data", "end_date")
        .unwrap_or_else(|| DEFAULT_END_DATE.to_string());

    let start_date = parse_date(&start_str, "start_date")?;
    let end_date = parse_date(&end_str, "end_date")?;

    if start_date >= end_date {
        return Err(TrackerError::ConfigInvalid {
            section: "data".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }
    Ok((start_date, end_date))
}

/// Parses `[section] key`, falling back to `default` only when the key is absent.
pub fn parse_value<T>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: T,
) -> Result<T, TrackerError>
where
    T: FromStr,
    T::Err: Display,
{
    match config.get_string(section, key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e| TrackerError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("cannot parse '{}': {}", raw.trim(), e),
        }),
    }
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, TrackerError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| TrackerError::ConfigInvalid {
        section: "data".to_string(),
        key: field.to_string(),
        reason: format!("invalid {} format, expected YYYY-MM-DD", field),
    })
}
