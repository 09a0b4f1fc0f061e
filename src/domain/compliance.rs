//! Threshold checks against the derived ratios.

use std::fmt;

use super::error::{InvalidReason, TrackerError};
use super::period::PeriodRecord;
use super::ratios::{RatioRecord, Ratios};

/// Minimum capital adequacy ratio (inclusive).
pub const MIN_CAPITAL_ADEQUACY: f64 = 0.08;
/// Minimum liquidity coverage ratio (inclusive).
pub const MIN_LIQUIDITY_COVERAGE: f64 = 1.0;
/// Maximum leverage ratio (inclusive).
pub const MAX_LEVERAGE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    CapitalAdequacy,
    LiquidityCoverage,
    Leverage,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::CapitalAdequacy,
        Metric::LiquidityCoverage,
        Metric::Leverage,
    ];

    pub fn short_name(self) -> &'static str {
        match self {
            Metric::CapitalAdequacy => "CAR",
            Metric::LiquidityCoverage => "LCR",
            Metric::Leverage => "Lev",
        }
    }

    pub fn threshold(self) -> f64 {
        match self {
            Metric::CapitalAdequacy => MIN_CAPITAL_ADEQUACY,
            Metric::LiquidityCoverage => MIN_LIQUIDITY_COVERAGE,
            Metric::Leverage => MAX_LEVERAGE,
        }
    }

    pub fn value(self, ratios: &Ratios) -> f64 {
        match self {
            Metric::CapitalAdequacy => ratios.capital_adequacy,
            Metric::LiquidityCoverage => ratios.liquidity_coverage,
            Metric::Leverage => ratios.leverage,
        }
    }

    /// Leverage is a ceiling; the other two are floors.
    pub fn passes(self, value: f64) -> bool {
        match self {
            Metric::CapitalAdequacy | Metric::LiquidityCoverage => value >= self.threshold(),
            Metric::Leverage => value <= self.threshold(),
        }
    }

    fn field_name(self) -> &'static str {
        match self {
            Metric::CapitalAdequacy => "capital_adequacy",
            Metric::LiquidityCoverage => "liquidity_coverage",
            Metric::Leverage => "leverage",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::CapitalAdequacy => "Capital Adequacy Ratio",
            Metric::LiquidityCoverage => "Liquidity Coverage Ratio",
            Metric::Leverage => "Leverage Ratio",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplianceFlags {
    pub capital_adequacy_ok: bool,
    pub liquidity_coverage_ok: bool,
    pub leverage_ok: bool,
}

impl ComplianceFlags {
    pub fn compliant(&self) -> bool {
        self.capital_adequacy_ok && self.liquidity_coverage_ok && self.leverage_ok
    }

    pub fn is_ok(&self, metric: Metric) -> bool {
        match metric {
            Metric::CapitalAdequacy => self.capital_adequacy_ok,
            Metric::LiquidityCoverage => self.liquidity_coverage_ok,
            Metric::Leverage => self.leverage_ok,
        }
    }

    pub fn failed_metrics(&self) -> Vec<Metric> {
        Metric::ALL
            .into_iter()
            .filter(|&m| !self.is_ok(m))
            .collect()
    }
}

/// A period with ratios and compliance flags attached.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedRecord {
    pub period: PeriodRecord,
    pub ratios: Ratios,
    pub flags: ComplianceFlags,
}

impl EvaluatedRecord {
    pub fn compliant(&self) -> bool {
        self.flags.compliant()
    }
}

pub fn evaluate(ratios: &Ratios) -> Result<ComplianceFlags, TrackerError> {
    for metric in Metric::ALL {
        if !metric.value(ratios).is_finite() {
            return Err(TrackerError::InvalidInput {
                date: None,
                reason: InvalidReason::UndefinedRatio {
                    metric: metric.field_name(),
                },
            });
        }
    }

    Ok(ComplianceFlags {
        capital_adequacy_ok: Metric::CapitalAdequacy.passes(ratios.capital_adequacy),
        liquidity_coverage_ok: Metric::LiquidityCoverage.passes(ratios.liquidity_coverage),
        leverage_ok: Metric::Leverage.passes(ratios.leverage),
    })
}

pub fn evaluate_all(records: Vec<RatioRecord>) -> Result<Vec<EvaluatedRecord>, TrackerError> {
    records
        .into_iter()
        .map(|RatioRecord { period, ratios }| {
            let flags = evaluate(&ratios).map_err(|err| match err {
                TrackerError::InvalidInput { date: None, reason } => {
                    TrackerError::invalid(period.date, reason)
                }
                other => other,
            })?;
            Ok(EvaluatedRecord {
                period,
                ratios,
                flags,
            })
        })
        .collect()
}
