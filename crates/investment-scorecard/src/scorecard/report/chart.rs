use super::super::domain::MAX_SCORE;
use super::super::model::Scorecard;
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt;

const CHART_MARGIN: f64 = 50.0;
const MIN_RADIUS: f64 = 10.0;
const SERIES_COLORS: [&str; 2] = ["#636efa", "#ef553b"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: &'static str,
    pub values: Vec<f64>,
}

/// Polar chart comparing each factor's average score with its weight.
///
/// Weights are scaled by the maximum score so both series share the radial axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
    pub radial_range: [f64; 2],
}

impl RadarChart {
    pub fn from_scorecard(scorecard: &Scorecard) -> Self {
        let max = f64::from(MAX_SCORE);
        let factors = scorecard.factors();
        Self {
            categories: factors.iter().map(|f| f.name.clone()).collect(),
            series: vec![
                ChartSeries {
                    name: "Scores",
                    values: factors.iter().map(|f| f.average_score()).collect(),
                },
                ChartSeries {
                    name: "Weights",
                    values: factors.iter().map(|f| f.weight * max).collect(),
                },
            ],
            radial_range: [0.0, max],
        }
    }

    /// Render a standalone square SVG document `size` pixels wide.
    pub fn to_svg(&self, size: u32) -> String {
        RadarSvg { chart: self, size }.to_string()
    }

    fn vertex(&self, center: f64, radius: f64, index: usize, fraction: f64) -> (f64, f64) {
        let count = self.categories.len().max(1) as f64;
        let angle = -PI / 2.0 + 2.0 * PI * index as f64 / count;
        (
            center + radius * fraction * angle.cos(),
            center + radius * fraction * angle.sin(),
        )
    }

    fn polygon_points(
        &self,
        center: f64,
        radius: f64,
        fraction: impl Fn(usize) -> f64,
    ) -> String {
        (0..self.categories.len())
            .map(|index| {
                let (x, y) = self.vertex(center, radius, index, fraction(index));
                format!("{x:.2},{y:.2}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

struct RadarSvg<'a> {
    chart: &'a RadarChart,
    size: u32,
}

impl fmt::Display for RadarSvg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chart = self.chart;
        let size = f64::from(self.size);
        let center = size / 2.0;
        let radius = (center - CHART_MARGIN).max(MIN_RADIUS);
        let span = chart.radial_range[1] - chart.radial_range[0];

        write!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}" font-family="Helvetica, Arial, sans-serif" font-size="12">"#
        )?;

        let rings = chart.radial_range[1].round().max(1.0) as u32;
        for ring in 1..=rings {
            let fraction = f64::from(ring) / f64::from(rings);
            let points = chart.polygon_points(center, radius, |_| fraction);
            write!(
                f,
                r##"<polygon points="{points}" fill="none" stroke="#d0d0d0" stroke-width="1"/>"##
            )?;
        }

        for (index, category) in chart.categories.iter().enumerate() {
            let (x, y) = chart.vertex(center, radius, index, 1.0);
            write!(
                f,
                r##"<line x1="{center:.2}" y1="{center:.2}" x2="{x:.2}" y2="{y:.2}" stroke="#d0d0d0" stroke-width="1"/>"##
            )?;
            let (lx, ly) = chart.vertex(center, radius + 16.0, index, 1.0);
            write!(
                f,
                r#"<text x="{lx:.2}" y="{ly:.2}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                escape_xml(category)
            )?;
        }

        for (series, color) in chart.series.iter().zip(SERIES_COLORS.iter().cycle()) {
            let points = chart.polygon_points(center, radius, |index| {
                let value = series.values.get(index).copied().unwrap_or_default();
                if span > 0.0 {
                    ((value - chart.radial_range[0]) / span).clamp(0.0, 1.0)
                } else {
                    0.0
                }
            });
            write!(
                f,
                r#"<polygon points="{points}" fill="{color}" fill-opacity="0.35" stroke="{color}" stroke-width="2"><title>{}</title></polygon>"#,
                series.name
            )?;
        }

        for (offset, (series, color)) in chart
            .series
            .iter()
            .zip(SERIES_COLORS.iter().cycle())
            .enumerate()
        {
            let y = 16.0 + offset as f64 * 18.0;
            write!(
                f,
                r#"<rect x="{:.2}" y="{:.2}" width="12" height="12" fill="{color}"/><text x="{:.2}" y="{:.2}">{}</text>"#,
                size - 90.0,
                y - 10.0,
                size - 72.0,
                y,
                series.name
            )?;
        }

        f.write_str("</svg>")
    }
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
