//! Annotated correlation heatmap.

use super::{TEXT_COLOR, blend, escape, svg_open, text_el, title};
use crate::domain::correlation::CorrelationMatrix;

const CELL: f64 = 56.0;
const MARGIN_LEFT: f64 = 170.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 150.0;

const NEGATIVE: (u8, u8, u8) = (59, 76, 192);
const NEUTRAL: (u8, u8, u8) = (221, 221, 221);
const POSITIVE: (u8, u8, u8) = (180, 4, 38);
const UNDEFINED_FILL: &str = "#f3f4f6";

/// Diverging fill for a coefficient in [-1, 1].
pub fn cell_color(r: f64) -> String {
    if !r.is_finite() {
        return UNDEFINED_FILL.to_string();
    }
    if r < 0.0 {
        blend(NEUTRAL, NEGATIVE, -r)
    } else {
        blend(NEUTRAL, POSITIVE, r)
    }
}

pub fn render_correlation(matrix: &CorrelationMatrix) -> String {
    let n = matrix.size();
    let width = MARGIN_LEFT + n as f64 * CELL + MARGIN_RIGHT;
    let height = MARGIN_TOP + n as f64 * CELL + MARGIN_BOTTOM;

    let mut svg = svg_open(width, height);
    title(
        &mut svg,
        width,
        "Price Correlation Matrix",
        "Pearson coefficient between daily price series",
    );

    for row in 0..n {
        for col in 0..n {
            let r = matrix.get(row, col);
            let x = MARGIN_LEFT + col as f64 * CELL;
            let y = MARGIN_TOP + row as f64 * CELL;
            svg.push_str(&format!(
                "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\" stroke=\"white\"/>\n",
                x, y, CELL, CELL, cell_color(r)
            ));
            let label = if r.is_finite() {
                format!("{:.2}", r)
            } else {
                "n/a".to_string()
            };
            let ink = if r.is_finite() && r.abs() > 0.6 { "white" } else { "#222" };
            svg.push_str(&format!(
                "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"10\" fill=\"{}\">{}</text>\n",
                x + CELL / 2.0,
                y + CELL / 2.0 + 4.0,
                ink,
                label
            ));
        }
    }

    for (i, label) in matrix.labels.iter().enumerate() {
        let offset = i as f64 * CELL + CELL / 2.0;
        text_el(&mut svg, MARGIN_LEFT - 6.0, MARGIN_TOP + offset + 4.0, "end", 10, label);

        // Column labels rotated under the grid
        let x = MARGIN_LEFT + offset;
        let y = MARGIN_TOP + n as f64 * CELL + 10.0;
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"10\" fill=\"{}\" transform=\"rotate(-45 {:.1} {:.1})\">{}</text>\n",
            x,
            y,
            TEXT_COLOR,
            x,
            y,
            escape(label)
        ));
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::DailyTable;
    use chrono::{Duration, NaiveDate};

    fn matrix() -> CorrelationMatrix {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let rows = (0..10)
            .map(|i| {
                let x = i as f64;
                (start + Duration::days(i), vec![x, -2.0 * x, 7.0])
            })
            .collect();
        let table =
            DailyTable::new(vec!["Up".into(), "Down".into(), "Flat".into()], rows).unwrap();
        CorrelationMatrix::compute(&table)
    }

    #[test]
    fn colour_scale_endpoints() {
        assert_eq!(cell_color(1.0), "#b40426");
        assert_eq!(cell_color(-1.0), "#3b4cc0");
        assert_eq!(cell_color(0.0), "#dddddd");
        assert_eq!(cell_color(f64::NAN), UNDEFINED_FILL);
    }

    #[test]
    fn one_annotated_cell_per_pair() {
        let svg = render_correlation(&matrix());
        assert_eq!(svg.matches("stroke=\"white\"").count(), 9);
        assert_eq!(svg.matches(">1.00<").count(), 3);
        assert_eq!(svg.matches(">-1.00<").count(), 2);
        // Flat column against the others
        assert_eq!(svg.matches(">n/a<").count(), 4);
        assert!(!svg.contains("NaN"));
    }
}
