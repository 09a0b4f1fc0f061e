//! Data acquisition port trait.

use crate::domain::error::TrackerError;
use crate::domain::period::PeriodRecord;
use chrono::NaiveDate;

pub trait DataPort {
    /// Periods with `start_date <= date <= end_date`, sorted by date.
    fn fetch_periods(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PeriodRecord>, TrackerError>;
}
