//! End-to-end compliance pipeline: derive, evaluate, aggregate.

use chrono::NaiveDate;

use super::compliance::{evaluate_all, EvaluatedRecord};
use super::error::TrackerError;
use super::period::PeriodRecord;
use super::rate::compliance_rate;
use super::ratios::derive_all;

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerResult {
    pub records: Vec<EvaluatedRecord>,
    pub compliance_rate: f64,
}

impl TrackerResult {
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.period.date)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.period.date)
    }
}

pub fn run(periods: &[PeriodRecord]) -> Result<TrackerResult, TrackerError> {
    let ratio_records = derive_all(periods)?;
    let records = evaluate_all(ratio_records)?;
    let compliance_rate = compliance_rate(&records)?;
    Ok(TrackerResult {
        records,
        compliance_rate,
    })
}
