//! Balance-sheet period records.

use chrono::NaiveDate;

use super::error::{InvalidReason, TrackerError};

/// Raw balance-sheet figures for one reporting date.
///
/// All monetary fields share one currency unit and must be non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodRecord {
    pub date: NaiveDate,
    pub assets: f64,
    pub risk_weighted_assets: f64,
    pub capital: f64,
    pub liquid_assets: f64,
    pub debt: f64,
}

impl PeriodRecord {
    /// Field names paired with their values, in column order.
    pub fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("assets", self.assets),
            ("risk_weighted_assets", self.risk_weighted_assets),
            ("capital", self.capital),
            ("liquid_assets", self.liquid_assets),
            ("debt", self.debt),
        ]
    }

    /// Rejects non-finite or negative monetary fields.
    pub fn validate(&self) -> Result<(), TrackerError> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(TrackerError::invalid(
                    self.date,
                    InvalidReason::NonFiniteField { field },
                ));
            }
            if value < 0.0 {
                return Err(TrackerError::invalid(
                    self.date,
                    InvalidReason::NegativeField { field, value },
                ));
            }
        }
        Ok(())
    }
}

/// Checks that dates are strictly increasing, which also rules out duplicates.
pub fn validate_sequence(periods: &[PeriodRecord]) -> Result<(), TrackerError> {
    for pair in periods.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        if curr.date <= prev.date {
            return Err(TrackerError::invalid(
                curr.date,
                InvalidReason::UnorderedDates {
                    previous: prev.date,
                },
            ));
        }
    }
    Ok(())
}
