//! CSV file data adapter.
//!
//! Expects a header row followed by
//! `date,assets,risk_weighted_assets,capital,liquid_assets,debt` columns.

use crate::domain::error::{InvalidReason, TrackerError};
use crate::domain::period::PeriodRecord;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use csv::StringRecord;
use std::fs;
use std::path::PathBuf;

pub const CSV_HEADER: [&str; 6] = [
    "date",
    "assets",
    "risk_weighted_assets",
    "capital",
    "liquid_assets",
    "debt",
];

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Writes periods in the layout `fetch_periods` reads back.
    pub fn write_periods(&self, periods: &[PeriodRecord]) -> Result<(), TrackerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let to_data_error = |e: csv::Error| TrackerError::Data {
            reason: format!("failed to write {}: {}", self.path.display(), e),
        };

        let mut writer = csv::Writer::from_path(&self.path).map_err(to_data_error)?;
        writer.write_record(CSV_HEADER).map_err(to_data_error)?;
        for p in periods {
            writer
                .write_record([
                    p.date.format("%Y-%m-%d").to_string(),
                    p.assets.to_string(),
                    p.risk_weighted_assets.to_string(),
                    p.capital.to_string(),
                    p.liquid_assets.to_string(),
                    p.debt.to_string(),
                ])
                .map_err(to_data_error)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn parse_record(record: &StringRecord) -> Result<PeriodRecord, TrackerError> {
        let date_str = required(record, 0, None)?;
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            TrackerError::Data {
                reason: format!("invalid date '{}': {}", date_str, e),
            }
        })?;

        let amount = |index: usize| -> Result<f64, TrackerError> {
            let raw = required(record, index, Some(date))?;
            raw.parse().map_err(|e| TrackerError::Data {
                reason: format!("invalid {} value '{}' on {}: {}", CSV_HEADER[index], raw, date, e),
            })
        };

        Ok(PeriodRecord {
            date,
            assets: amount(1)?,
            risk_weighted_assets: amount(2)?,
            capital: amount(3)?,
            liquid_assets: amount(4)?,
            debt: amount(5)?,
        })
    }
}

fn required(
    record: &StringRecord,
    index: usize,
    date: Option<NaiveDate>,
) -> Result<&str, TrackerError> {
    match record.get(index).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(TrackerError::InvalidInput {
            date,
            reason: InvalidReason::MissingField {
                field: CSV_HEADER[index],
            },
        }),
    }
}

/// Columns are read by position, so the header must match exactly.
fn check_header(headers: &StringRecord) -> Result<(), TrackerError> {
    if !headers.iter().map(str::trim).eq(CSV_HEADER) {
        return Err(TrackerError::Data {
            reason: format!(
                "unexpected CSV header '{}', expected '{}'",
                headers.iter().collect::<Vec<_>>().join(","),
                CSV_HEADER.join(",")
            ),
        });
    }
    Ok(())
}

impl DataPort for CsvAdapter {
    fn fetch_periods(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PeriodRecord>, TrackerError> {
        let content = fs::read_to_string(&self.path).map_err(|e| TrackerError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| TrackerError::Data {
            reason: format!("CSV parse error: {}", e),
        })?;
        check_header(headers)?;
        let mut periods = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| TrackerError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let period = Self::parse_record(&record)?;
            if period.date < start_date || period.date > end_date {
                continue;
            }
            periods.push(period);
        }

        periods.sort_by_key(|p| p.date);
        tracing::debug!(
            path = %self.path.display(),
            periods = periods.len(),
            "loaded periods from csv"
        );
        Ok(periods)
    }
}
