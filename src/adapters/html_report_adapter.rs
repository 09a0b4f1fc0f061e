//! HTML report adapter implementing ReportPort.
//!
//! Generates HTML reports using Askama templates with an inline SVG chart.

use std::fs;
use std::path::Path;

use askama::Template;

use crate::adapters::chart_svg::generate_ratio_chart_svg;
use crate::domain::compliance::{EvaluatedRecord, Metric};
use crate::domain::error::TrackerError;
use crate::domain::summary::Summary;
use crate::domain::tracker::TrackerResult;
use crate::ports::report_port::ReportPort;

struct MetricRow {
    name: String,
    short_name: &'static str,
    threshold: String,
    average: String,
    breaches: usize,
}

struct PeriodRow {
    date: String,
    car: String,
    lcr: String,
    leverage: String,
    car_ok: bool,
    lcr_ok: bool,
    leverage_ok: bool,
    compliant: bool,
}

impl From<&EvaluatedRecord> for PeriodRow {
    fn from(record: &EvaluatedRecord) -> Self {
        PeriodRow {
            date: record.period.date.format("%Y-%m-%d").to_string(),
            car: format!("{:.1}%", record.ratios.capital_adequacy * 100.0),
            lcr: format!("{:.2}", record.ratios.liquidity_coverage),
            leverage: format!("{:.2}", record.ratios.leverage),
            car_ok: record.flags.capital_adequacy_ok,
            lcr_ok: record.flags.liquidity_coverage_ok,
            leverage_ok: record.flags.leverage_ok,
            compliant: record.compliant(),
        }
    }
}

fn metric_rows(summary: &Summary) -> Vec<MetricRow> {
    Metric::ALL
        .into_iter()
        .map(|metric| {
            let (threshold, average) = match metric {
                Metric::CapitalAdequacy => (
                    format!(">= {:.1}%", metric.threshold() * 100.0),
                    format!("{:.1}%", summary.average(metric) * 100.0),
                ),
                Metric::LiquidityCoverage => (
                    format!(">= {:.2}", metric.threshold()),
                    format!("{:.3}", summary.average(metric)),
                ),
                Metric::Leverage => (
                    format!("<= {:.2}", metric.threshold()),
                    format!("{:.3}", summary.average(metric)),
                ),
            };
            MetricRow {
                name: metric.to_string(),
                short_name: metric.short_name(),
                threshold,
                average,
                breaches: summary.breaches(metric),
            }
        })
        .collect()
}

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate<'a> {
    title: String,
    summary: &'a Summary,
    start_date: String,
    end_date: String,
    chart_svg: String,
    metrics: Vec<MetricRow>,
    rows: Vec<PeriodRow>,
}

#[derive(Debug, Default)]
pub struct HtmlReportAdapter;

impl HtmlReportAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, result: &TrackerResult, summary: &Summary) -> Result<String, TrackerError> {
        let format_date = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.format("%b %Y").to_string()).unwrap_or_default()
        };

        let template = ReportTemplate {
            title: format!("Compliance Tracker (Rate: {:.1}%)", summary.compliance_rate),
            summary,
            start_date: format_date(result.start_date()),
            end_date: format_date(result.end_date()),
            chart_svg: generate_ratio_chart_svg(&result.records),
            metrics: metric_rows(summary),
            rows: result.records.iter().map(PeriodRow::from).collect(),
        };

        template.render().map_err(|e| TrackerError::Report {
            reason: e.to_string(),
        })
    }
}

impl ReportPort for HtmlReportAdapter {
    fn write(
        &self,
        result: &TrackerResult,
        summary: &Summary,
        output_path: &str,
    ) -> Result<(), TrackerError> {
        let html = self.render(result, summary)?;

        let path = Path::new(output_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, html)?;

        tracing::debug!(path = output_path, "wrote html report");
        Ok(())
    }
}
