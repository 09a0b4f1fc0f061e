//! Tabular CSV export of fully evaluated periods, implementing ReportPort.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::domain::compliance::EvaluatedRecord;
use crate::domain::error::TrackerError;
use crate::domain::summary::Summary;
use crate::domain::tracker::TrackerResult;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Serialize)]
struct ExportRow {
    date: String,
    assets: f64,
    risk_weighted_assets: f64,
    capital: f64,
    liquid_assets: f64,
    debt: f64,
    capital_adequacy_ratio: f64,
    liquidity_coverage_ratio: f64,
    leverage_ratio: f64,
    capital_adequacy_ok: bool,
    liquidity_coverage_ok: bool,
    leverage_ok: bool,
    compliant: bool,
}

impl From<&EvaluatedRecord> for ExportRow {
    fn from(record: &EvaluatedRecord) -> Self {
        let p = &record.period;
        ExportRow {
            date: p.date.format("%Y-%m-%d").to_string(),
            assets: p.assets,
            risk_weighted_assets: p.risk_weighted_assets,
            capital: p.capital,
            liquid_assets: p.liquid_assets,
            debt: p.debt,
            capital_adequacy_ratio: record.ratios.capital_adequacy,
            liquidity_coverage_ratio: record.ratios.liquidity_coverage,
            leverage_ratio: record.ratios.leverage,
            capital_adequacy_ok: record.flags.capital_adequacy_ok,
            liquidity_coverage_ok: record.flags.liquidity_coverage_ok,
            leverage_ok: record.flags.leverage_ok,
            compliant: record.compliant(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        result: &TrackerResult,
        _summary: &Summary,
        output_path: &str,
    ) -> Result<(), TrackerError> {
        let path = Path::new(output_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(path).map_err(|e| TrackerError::Report {
            reason: format!("failed to open {}: {}", output_path, e),
        })?;
        for record in &result.records {
            writer
                .serialize(ExportRow::from(record))
                .map_err(|e| TrackerError::Report {
                    reason: format!("failed to write row: {}", e),
                })?;
        }
        writer.flush()?;

        tracing::debug!(path = output_path, rows = result.records.len(), "wrote csv export");
        Ok(())
    }
}
