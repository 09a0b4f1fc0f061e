//! SVG chart rendering for reports.
//!
//! Plots CAR (left axis, percent ticks) and LCR (right axis) over time, each
//! with a dashed line at its regulatory minimum.

use std::fmt::Write;

use crate::domain::compliance::{EvaluatedRecord, MIN_CAPITAL_ADEQUACY, MIN_LIQUIDITY_COVERAGE};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;
const PADDING: f64 = 50.0;
const Y_TICKS: usize = 5;
/// Label every third period on the x axis.
const X_LABEL_STEP: usize = 3;

const BACKGROUND: &str = "rgb(40, 40, 40)";
const GRID: &str = "rgba(255, 255, 255, 0.1)";
const SERIES: &str = "#FF6B6B";
const THRESHOLD: &str = "#4ECDC4";

/// Value-to-pixel mapping for one vertical axis.
struct Axis {
    min: f64,
    max: f64,
}

impl Axis {
    /// Covers all values plus the threshold, anchored at zero.
    fn fit(values: impl Iterator<Item = f64>, threshold: f64) -> Self {
        let max = values.fold(threshold, f64::max) * 1.1;
        Axis { min: 0.0, max }
    }

    fn y(&self, value: f64) -> f64 {
        let plot_height = HEIGHT - 2.0 * PADDING;
        let range = self.max - self.min;
        let scale = if range > 0.0 { plot_height / range } else { 1.0 };
        HEIGHT - PADDING - (value - self.min) * scale
    }

    fn tick(&self, i: usize) -> f64 {
        self.min + (self.max - self.min) * i as f64 / Y_TICKS as f64
    }
}

fn x_at(index: usize, count: usize) -> f64 {
    let plot_width = WIDTH - 2.0 * PADDING;
    if count > 1 {
        PADDING + index as f64 * plot_width / (count - 1) as f64
    } else {
        PADDING + plot_width / 2.0
    }
}

fn polyline(values: &[f64], axis: &Axis, stroke: &str, width: f64, dashed: bool) -> String {
    let points: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| format!("{:.1},{:.1}", x_at(i, values.len()), axis.y(v)))
        .collect();
    let dash = if dashed {
        " stroke-dasharray=\"6,4\""
    } else {
        ""
    };
    format!(
        "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"{}/>",
        points.join(" "),
        stroke,
        width,
        dash
    )
}

/// Returns an empty string when there is nothing to plot.
pub fn generate_ratio_chart_svg(records: &[EvaluatedRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let car: Vec<f64> = records.iter().map(|r| r.ratios.capital_adequacy).collect();
    let lcr: Vec<f64> = records.iter().map(|r| r.ratios.liquidity_coverage).collect();
    let car_axis = Axis::fit(car.iter().copied(), MIN_CAPITAL_ADEQUACY);
    let lcr_axis = Axis::fit(lcr.iter().copied(), MIN_LIQUIDITY_COVERAGE);

    let left = PADDING;
    let right = WIDTH - PADDING;
    let bottom = HEIGHT - PADDING;

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" \
         width=\"{WIDTH}\" height=\"{HEIGHT}\" font-family=\"sans-serif\">"
    );
    let _ = write!(
        svg,
        "<rect width=\"{WIDTH}\" height=\"{HEIGHT}\" fill=\"{BACKGROUND}\"/>"
    );

    for i in 0..=Y_TICKS {
        let car_value = car_axis.tick(i);
        let y = car_axis.y(car_value);
        let _ = write!(
            svg,
            "<line x1=\"{left}\" y1=\"{y:.1}\" x2=\"{right}\" y2=\"{y:.1}\" stroke=\"{GRID}\" stroke-width=\"0.5\"/>"
        );
        let _ = write!(
            svg,
            "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"white\" font-size=\"12\" text-anchor=\"end\">{:.1}%</text>",
            left - 8.0,
            y + 4.0,
            car_value * 100.0
        );
        let _ = write!(
            svg,
            "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"white\" font-size=\"12\">{:.2}</text>",
            right + 8.0,
            y + 4.0,
            lcr_axis.tick(i)
        );
    }

    for (i, record) in records.iter().enumerate().step_by(X_LABEL_STEP) {
        let x = x_at(i, records.len());
        let _ = write!(
            svg,
            "<line x1=\"{x:.1}\" y1=\"{bottom}\" x2=\"{x:.1}\" y2=\"{:.1}\" stroke=\"white\"/>",
            bottom + 8.0
        );
        let _ = write!(
            svg,
            "<text x=\"{x:.1}\" y=\"{:.1}\" fill=\"white\" font-size=\"12\" text-anchor=\"middle\">{}</text>",
            bottom + 22.0,
            record.period.date.format("%b %Y")
        );
    }

    let car_min = vec![MIN_CAPITAL_ADEQUACY; records.len()];
    let lcr_min = vec![MIN_LIQUIDITY_COVERAGE; records.len()];
    svg.push_str(&polyline(&car, &car_axis, SERIES, 2.0, false));
    svg.push_str(&polyline(&car_min, &car_axis, THRESHOLD, 1.0, true));
    svg.push_str(&polyline(&lcr, &lcr_axis, SERIES, 2.0, false));
    svg.push_str(&polyline(&lcr_min, &lcr_axis, THRESHOLD, 1.0, true));

    let _ = write!(
        svg,
        "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"white\" font-size=\"14\" text-anchor=\"middle\">Date</text>",
        WIDTH / 2.0,
        HEIGHT - 6.0
    );
    let _ = write!(
        svg,
        "<text x=\"14\" y=\"{:.1}\" fill=\"white\" font-size=\"14\" \
         transform=\"rotate(-90 14 {:.1})\" text-anchor=\"middle\">CAR</text>",
        HEIGHT / 2.0,
        HEIGHT / 2.0
    );
    let _ = write!(
        svg,
        "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"white\" font-size=\"14\" \
         transform=\"rotate(90 {:.1} {:.1})\" text-anchor=\"middle\">LCR</text>",
        WIDTH - 14.0,
        HEIGHT / 2.0,
        WIDTH - 14.0,
        HEIGHT / 2.0
    );

    svg.push_str(&legend());
    svg.push_str("</svg>");
    svg
}

/// One entry per plotted line, laid out across the top margin.
fn legend() -> String {
    const ENTRIES: [(&str, &str, f64, bool); 4] = [
        ("CAR", SERIES, 2.0, false),
        ("CAR Min", THRESHOLD, 1.0, true),
        ("LCR", SERIES, 2.0, false),
        ("LCR Min", THRESHOLD, 1.0, true),
    ];
    const ENTRY_WIDTH: f64 = 110.0;
    const SWATCH: f64 = 24.0;

    let y = PADDING / 2.0;
    let mut out = String::from("<g class=\"legend\">");
    for (i, (name, stroke, width, dashed)) in ENTRIES.into_iter().enumerate() {
        let x = PADDING + i as f64 * ENTRY_WIDTH;
        let dash = if dashed {
            " stroke-dasharray=\"6,4\""
        } else {
            ""
        };
        let _ = write!(
            out,
            "<line x1=\"{x:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"{stroke}\" stroke-width=\"{width}\"{dash}/>\
             <text x=\"{:.1}\" y=\"{:.1}\" fill=\"white\" font-size=\"12\">{name}</text>",
            x + SWATCH,
            x + SWATCH + 6.0,
            y + 4.0
        );
    }
    out.push_str("</g>");
    out
}
