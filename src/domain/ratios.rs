//! Regulatory ratio derivation from raw balance-sheet figures.

use super::error::{InvalidReason, TrackerError};
use super::period::{validate_sequence, PeriodRecord};

/// Share of debt that liquid assets must cover for the LCR.
pub const LCR_DEBT_FRACTION: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratios {
    /// capital / risk_weighted_assets
    pub capital_adequacy: f64,
    /// liquid_assets / (debt * 0.1)
    pub liquidity_coverage: f64,
    /// assets / capital
    pub leverage: f64,
}

/// A period with its derived ratios attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioRecord {
    pub period: PeriodRecord,
    pub ratios: Ratios,
}

pub fn derive_ratios(period: &PeriodRecord) -> Result<Ratios, TrackerError> {
    period.validate()?;

    let rwa = positive_denominator(period, "risk_weighted_assets", period.risk_weighted_assets)?;
    let debt = positive_denominator(period, "debt", period.debt)?;
    let capital = positive_denominator(period, "capital", period.capital)?;

    Ok(Ratios {
        capital_adequacy: finite_ratio(period, "capital_adequacy", period.capital / rwa)?,
        liquidity_coverage: finite_ratio(
            period,
            "liquidity_coverage",
            period.liquid_assets / (debt * LCR_DEBT_FRACTION),
        )?,
        leverage: finite_ratio(period, "leverage", period.assets / capital)?,
    })
}

/// Derives ratios for every period, preserving order.
///
/// Fails on the first invalid record; no partial output is returned.
pub fn derive_all(periods: &[PeriodRecord]) -> Result<Vec<RatioRecord>, TrackerError> {
    validate_sequence(periods)?;
    periods
        .iter()
        .map(|period| {
            Ok(RatioRecord {
                period: period.clone(),
                ratios: derive_ratios(period)?,
            })
        })
        .collect()
}

fn positive_denominator(
    period: &PeriodRecord,
    field: &'static str,
    value: f64,
) -> Result<f64, TrackerError> {
    if value <= 0.0 {
        return Err(TrackerError::invalid(
            period.date,
            InvalidReason::NonPositiveDenominator { field, value },
        ));
    }
    Ok(value)
}

/// Tiny positive denominators can still overflow to infinity.
fn finite_ratio(
    period: &PeriodRecord,
    metric: &'static str,
    value: f64,
) -> Result<f64, TrackerError> {
    if !value.is_finite() {
        return Err(TrackerError::invalid(
            period.date,
            InvalidReason::UndefinedRatio { metric },
        ));
    }
    Ok(value)
}
