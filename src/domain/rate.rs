//! Compliance rate aggregation.

use super::compliance::EvaluatedRecord;
use super::error::TrackerError;

/// Running count of compliant periods.
///
/// Tallies from disjoint slices of a sequence can be merged in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateTally {
    pub compliant: usize,
    pub total: usize,
}

impl RateTally {
    pub fn from_flags<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        flags.into_iter().fold(Self::default(), |tally, compliant| {
            tally.merge(RateTally {
                compliant: usize::from(compliant),
                total: 1,
            })
        })
    }

    pub fn from_records(records: &[EvaluatedRecord]) -> Self {
        Self::from_flags(records.iter().map(EvaluatedRecord::compliant))
    }

    pub fn merge(self, other: RateTally) -> RateTally {
        RateTally {
            compliant: self.compliant + other.compliant,
            total: self.total + other.total,
        }
    }

    /// Percentage of compliant periods, in [0, 100].
    pub fn rate(&self) -> Result<f64, TrackerError> {
        if self.total == 0 {
            return Err(TrackerError::EmptyInput {
                stage: "compliance rate",
            });
        }
        Ok(100.0 * self.compliant as f64 / self.total as f64)
    }
}

pub fn compliance_rate(records: &[EvaluatedRecord]) -> Result<f64, TrackerError> {
    RateTally::from_records(records).rate()
}
