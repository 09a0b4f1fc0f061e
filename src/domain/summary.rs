//! Summary statistics over a tracked sequence.

use super::compliance::Metric;
use super::error::TrackerError;
use super::rate::RateTally;
use super::tracker::TrackerResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub periods: usize,
    pub compliant_periods: usize,
    pub compliance_rate: f64,
    pub avg_capital_adequacy: f64,
    pub avg_liquidity_coverage: f64,
    pub avg_leverage: f64,
    pub capital_adequacy_breaches: usize,
    pub liquidity_coverage_breaches: usize,
    pub leverage_breaches: usize,
}

impl Summary {
    pub fn compute(result: &TrackerResult) -> Result<Self, TrackerError> {
        let records = &result.records;
        let tally = RateTally::from_records(records);
        let compliance_rate = tally.rate()?;
        let n = tally.total as f64;

        let mean = |metric: Metric| {
            records
                .iter()
                .map(|r| metric.value(&r.ratios))
                .sum::<f64>()
                / n
        };
        let breaches = |metric: Metric| records.iter().filter(|r| !r.flags.is_ok(metric)).count();

        Ok(Summary {
            periods: tally.total,
            compliant_periods: tally.compliant,
            compliance_rate,
            avg_capital_adequacy: mean(Metric::CapitalAdequacy),
            avg_liquidity_coverage: mean(Metric::LiquidityCoverage),
            avg_leverage: mean(Metric::Leverage),
            capital_adequacy_breaches: breaches(Metric::CapitalAdequacy),
            liquidity_coverage_breaches: breaches(Metric::LiquidityCoverage),
            leverage_breaches: breaches(Metric::Leverage),
        })
    }

    pub fn average(&self, metric: Metric) -> f64 {
        match metric {
            Metric::CapitalAdequacy => self.avg_capital_adequacy,
            Metric::LiquidityCoverage => self.avg_liquidity_coverage,
            Metric::Leverage => self.avg_leverage,
        }
    }

    pub fn breaches(&self, metric: Metric) -> usize {
        match metric {
            Metric::CapitalAdequacy => self.capital_adequacy_breaches,
            Metric::LiquidityCoverage => self.liquidity_coverage_breaches,
            Metric::Leverage => self.leverage_breaches,
        }
    }

    /// Plain-text summary, one line per statistic.
    pub fn render_text(&self) -> String {
        format!(
            "Compliance Rate: {:.1}%\nAvg CAR: {:.3}\nAvg LCR: {:.3}\nAvg Leverage: {:.3}\n",
            self.compliance_rate,
            self.avg_capital_adequacy,
            self.avg_liquidity_coverage,
            self.avg_leverage
        )
    }
}
