//! Seeded synthetic balance-sheet generator.
//!
//! Produces one period per calendar month-end in the requested window, with
//! every monetary field drawn uniformly from its configured range. The same
//! seed and ranges always produce the same sequence.

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::config_validation::parse_value;
use crate::domain::error::TrackerError;
use crate::domain::period::PeriodRecord;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

pub const DEFAULT_SEED: u64 = 42;

/// Half-open sampling range `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticParams {
    pub seed: u64,
    pub assets: FieldRange,
    pub risk_weighted_assets: FieldRange,
    pub capital: FieldRange,
    pub liquid_assets: FieldRange,
    pub debt: FieldRange,
}

impl Default for SyntheticParams {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            assets: FieldRange::new(500_000.0, 1_000_000.0),
            risk_weighted_assets: FieldRange::new(300_000.0, 800_000.0),
            capital: FieldRange::new(50_000.0, 150_000.0),
            liquid_assets: FieldRange::new(20_000.0, 100_000.0),
            debt: FieldRange::new(400_000.0, 900_000.0),
        }
    }
}

impl SyntheticParams {
    /// Reads `[synthetic]`, falling back to the defaults for absent keys.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TrackerError> {
        let defaults = Self::default();

        let seed = parse_value(config, "synthetic", "seed", DEFAULT_SEED)?;

        Ok(Self {
            seed,
            assets: read_range(config, "assets", defaults.assets, false)?,
            risk_weighted_assets: read_range(config, "rwa", defaults.risk_weighted_assets, true)?,
            capital: read_range(config, "capital", defaults.capital, true)?,
            liquid_assets: read_range(config, "liquid_assets", defaults.liquid_assets, false)?,
            debt: read_range(config, "debt", defaults.debt, true)?,
        })
    }
}

/// Denominator fields need a strictly positive lower bound so no draw is zero.
fn read_range(
    config: &dyn ConfigPort,
    prefix: &str,
    default: FieldRange,
    denominator: bool,
) -> Result<FieldRange, TrackerError> {
    let min_key = format!("{prefix}_min");
    let max_key = format!("{prefix}_max");
    let min = parse_value(config, "synthetic", &min_key, default.min)?;
    let max = parse_value(config, "synthetic", &max_key, default.max)?;

    let invalid = |key: &str, reason: String| TrackerError::ConfigInvalid {
        section: "synthetic".to_string(),
        key: key.to_string(),
        reason,
    };

    if !min.is_finite() || !max.is_finite() {
        return Err(invalid(&min_key, format!("{prefix} range must be finite")));
    }
    if denominator && min <= 0.0 {
        return Err(invalid(&min_key, format!("{min_key} must be positive")));
    }
    if min < 0.0 {
        return Err(invalid(&min_key, format!("{min_key} must be non-negative")));
    }
    if min >= max {
        return Err(invalid(
            &max_key,
            format!("{max_key} must be greater than {min_key}"),
        ));
    }
    Ok(FieldRange { min, max })
}

pub struct SyntheticAdapter {
    params: SyntheticParams,
}

impl SyntheticAdapter {
    pub fn new(params: SyntheticParams) -> Self {
        Self { params }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TrackerError> {
        Ok(Self::new(SyntheticParams::from_config(config)?))
    }
}

impl Default for SyntheticAdapter {
    fn default() -> Self {
        Self::new(SyntheticParams::default())
    }
}

impl DataPort for SyntheticAdapter {
    fn fetch_periods(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PeriodRecord>, TrackerError> {
        let p = &self.params;
        let mut rng = StdRng::seed_from_u64(p.seed);

        let periods: Vec<PeriodRecord> = month_ends(start_date, end_date)
            .into_iter()
            .map(|date| PeriodRecord {
                date,
                assets: rng.gen_range(p.assets.min..p.assets.max),
                risk_weighted_assets: rng
                    .gen_range(p.risk_weighted_assets.min..p.risk_weighted_assets.max),
                capital: rng.gen_range(p.capital.min..p.capital.max),
                liquid_assets: rng.gen_range(p.liquid_assets.min..p.liquid_assets.max),
                debt: rng.gen_range(p.debt.min..p.debt.max),
            })
            .collect();

        tracing::debug!(
            seed = p.seed,
            periods = periods.len(),
            "generated synthetic periods"
        );
        Ok(periods)
    }
}

/// Last calendar day of every month that falls inside `[start, end]`.
pub fn month_ends(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let (mut year, mut month) = (start.year(), start.month());

    while let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
        if first > end {
            break;
        }
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let Some(last) = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
        else {
            break;
        };
        if last >= start && last <= end {
            dates.push(last);
        }
        year = next_year;
        month = next_month;
    }
    dates
}
