//! SVG chart rendering implementing [`ChartPort`].
//!
//! Each chart is assembled as an SVG string by a pure `render_*` function and
//! written to `<output_dir>/<file name>` by [`SvgChartAdapter`].

pub mod bars;
pub mod boxplot;
pub mod heatmap;
pub mod line;

use std::fs;
use std::path::PathBuf;

use crate::domain::correlation::CorrelationMatrix;
use crate::domain::error::PanganError;
use crate::domain::statistics::StatisticsTable;
use crate::domain::table::DailyTable;
use crate::ports::chart_port::{ChartPort, DistributionSpec};

pub const TREND_FILE: &str = "trend_5_commodities.svg";
pub const VOLATILITY_FILE: &str = "volatility_cv.svg";
pub const CORRELATION_FILE: &str = "price_correlation.svg";
pub const DISTRIBUTION_FILE: &str = "chili_monthly_distribution.svg";

const AXIS_COLOR: &str = "#ccc";
const TEXT_COLOR: &str = "#666";

/// Line colours for multi-series charts, cycled.
pub const PALETTE: [&str; 8] = [
    "#2563eb", "#dc2626", "#16a34a", "#d97706", "#7c3aed", "#0891b2", "#db2777", "#65a30d",
];

pub struct SvgChartAdapter {
    output_dir: PathBuf,
}

impl SvgChartAdapter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn write(&self, file_name: &str, svg: String) -> Result<PathBuf, PanganError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(file_name);
        fs::write(&path, svg)?;
        Ok(path)
    }
}

impl ChartPort for SvgChartAdapter {
    fn price_trend(
        &self,
        table: &DailyTable,
        commodities: &[String],
    ) -> Result<PathBuf, PanganError> {
        let svg = line::render_price_trend(table, commodities)?;
        self.write(TREND_FILE, svg)
    }

    fn volatility(&self, stats: &StatisticsTable) -> Result<PathBuf, PanganError> {
        self.write(VOLATILITY_FILE, bars::render_volatility(stats))
    }

    fn correlation(&self, matrix: &CorrelationMatrix) -> Result<PathBuf, PanganError> {
        self.write(CORRELATION_FILE, heatmap::render_correlation(matrix))
    }

    fn monthly_distribution(&self, spec: &DistributionSpec) -> Result<PathBuf, PanganError> {
        self.write(DISTRIBUTION_FILE, boxplot::render_distribution(spec))
    }
}

fn svg_open(width: f64, height: f64) -> String {
    let mut svg = format!(
        r##"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"##,
        width, height, width, height
    );
    svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    svg
}

fn title(svg: &mut String, width: f64, line1: &str, line2: &str) {
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"22\" text-anchor=\"middle\" font-size=\"16\" font-weight=\"bold\" fill=\"#222\">{}</text>\n",
        width / 2.0,
        escape(line1)
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"40\" text-anchor=\"middle\" font-size=\"11\" fill=\"{}\">{}</text>\n",
        width / 2.0,
        TEXT_COLOR,
        escape(line2)
    ));
}

fn line_el(svg: &mut String, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) {
    svg.push_str(&format!(
        "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"1\"/>\n",
        x1, y1, x2, y2, stroke
    ));
}

fn text_el(svg: &mut String, x: f64, y: f64, anchor: &str, size: u32, content: &str) {
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>\n",
        x,
        y,
        anchor,
        size,
        TEXT_COLOR,
        escape(content)
    ));
}

/// Minimal XML text escaping.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Linear blend between two RGB colours, `t` clamped to [0, 1].
pub fn blend(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> String {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        mix(from.0, to.0),
        mix(from.1, to.1),
        mix(from.2, to.2)
    )
}

/// Compact axis label: 52000 -> "52k".
fn fmt_thousands(value: f64) -> String {
    if value.abs() >= 1_000.0 {
        format!("{:.0}k", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::distribution::BoxSummary;
    use crate::domain::statistics::CommodityStats;
    use chrono::{Duration, NaiveDate};
    use tempfile::TempDir;

    fn small_table() -> DailyTable {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let rows = (0..40)
            .map(|i| {
                let i_f = i as f64;
                (start + Duration::days(i), vec![100.0 + i_f, 200.0 - i_f])
            })
            .collect();
        DailyTable::new(vec!["A".into(), "B".into()], rows).unwrap()
    }

    #[test]
    fn escape_special_characters() {
        assert_eq!(escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend((0, 0, 0), (255, 255, 255), 0.0), "#000000");
        assert_eq!(blend((0, 0, 0), (255, 255, 255), 1.0), "#ffffff");
        assert_eq!(blend((0, 0, 0), (255, 255, 255), 2.0), "#ffffff");
        assert_eq!(blend((0, 0, 0), (200, 100, 0), 0.5), "#643200");
    }

    #[test]
    fn thousands_labels() {
        assert_eq!(fmt_thousands(52_000.0), "52k");
        assert_eq!(fmt_thousands(950.0), "950");
    }

    #[test]
    fn adapter_writes_all_four_charts() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("charts");
        let adapter = SvgChartAdapter::new(&out);
        let table = small_table();

        let stats = StatisticsTable::compute(&table);
        let matrix = CorrelationMatrix::compute(&table);
        let summaries = vec![BoxSummary::from_values(1, &[1.0, 2.0, 3.0]).unwrap()];

        let paths = vec![
            adapter
                .price_trend(&table, &["A".to_string(), "B".to_string()])
                .unwrap(),
            adapter.volatility(&stats).unwrap(),
            adapter.correlation(&matrix).unwrap(),
            adapter
                .monthly_distribution(&DistributionSpec {
                    commodity: "A",
                    year: 2025,
                    summaries: &summaries,
                })
                .unwrap(),
        ];

        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec![TREND_FILE, VOLATILITY_FILE, CORRELATION_FILE, DISTRIBUTION_FILE]
        );
        for p in &paths {
            let content = fs::read_to_string(p).unwrap();
            assert!(content.starts_with("<svg"));
            assert!(content.ends_with("</svg>"));
        }
    }

    #[test]
    fn unknown_trend_commodity_is_an_error() {
        let dir = TempDir::new().unwrap();
        let adapter = SvgChartAdapter::new(dir.path());
        let err = adapter
            .price_trend(&small_table(), &["Z".to_string()])
            .unwrap_err();
        assert!(matches!(err, PanganError::UnknownCommodity(_)));
    }

    #[test]
    fn volatility_chart_tolerates_undefined_cv() {
        let stats = StatisticsTable::from_entries(vec![(
            "Zero".into(),
            CommodityStats {
                mean: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
                cv: None,
            },
        )]);
        let svg = bars::render_volatility(&stats);
        assert!(svg.contains("n/a"));
    }
}
