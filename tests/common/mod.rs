#![allow(dead_code)]

use chrono::NaiveDate;
use regtrack::domain::error::TrackerError;
pub use regtrack::domain::period::PeriodRecord;
use regtrack::ports::data_port::DataPort;

pub struct MockDataPort {
    pub periods: Vec<PeriodRecord>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            periods: Vec::new(),
            error: None,
        }
    }

    pub fn with_periods(mut self, periods: Vec<PeriodRecord>) -> Self {
        self.periods = periods;
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_periods(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PeriodRecord>, TrackerError> {
        if let Some(reason) = &self.error {
            return Err(TrackerError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .periods
            .iter()
            .filter(|p| p.date >= start_date && p.date <= end_date)
            .cloned()
            .collect())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The reference period: CAR 0.10, LCR 12.5, leverage 9.0.
pub fn make_period(date_str: &str) -> PeriodRecord {
    PeriodRecord {
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        assets: 900.0,
        risk_weighted_assets: 1000.0,
        capital: 100.0,
        liquid_assets: 50.0,
        debt: 40.0,
    }
}

/// A period breaching every threshold: CAR 0.01, LCR 0.25, leverage 100.
pub fn make_failing_period(date_str: &str) -> PeriodRecord {
    PeriodRecord {
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        assets: 1000.0,
        risk_weighted_assets: 1000.0,
        capital: 10.0,
        liquid_assets: 10.0,
        debt: 400.0,
    }
}

/// Consecutive days from `start`, alternating compliant and failing periods.
pub fn generate_periods(start: &str, count: usize) -> Vec<PeriodRecord> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| {
            let mut p = if i % 2 == 0 {
                make_period("2000-01-01")
            } else {
                make_failing_period("2000-01-01")
            };
            p.date = start + chrono::Duration::days(i as i64);
            p
        })
        .collect()
}
