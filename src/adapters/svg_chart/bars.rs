//! Horizontal bar chart of coefficient of variation per commodity.

use super::{AXIS_COLOR, TEXT_COLOR, blend, line_el, svg_open, text_el, title};
use crate::domain::statistics::StatisticsTable;

const CHART_WIDTH: f64 = 800.0;
const MARGIN_LEFT: f64 = 180.0;
const MARGIN_RIGHT: f64 = 70.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 30.0;
const BAR_HEIGHT: f64 = 22.0;
const BAR_GAP: f64 = 8.0;

const LOW: (u8, u8, u8) = (26, 152, 80);
const HIGH: (u8, u8, u8) = (215, 48, 39);

/// Bars run from most stable (top) to most volatile (bottom). Commodities
/// without a defined CV are listed last with an "n/a" label and no bar.
pub fn render_volatility(stats: &StatisticsTable) -> String {
    let ranked = stats.by_cv_ascending();
    let undefined = stats.undefined_cv();
    let rows = ranked.len() + undefined.len();

    let chart_height =
        MARGIN_TOP + MARGIN_BOTTOM + rows as f64 * (BAR_HEIGHT + BAR_GAP);
    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let max_cv = ranked
        .iter()
        .map(|(_, cv)| *cv)
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON);

    let mut svg = svg_open(CHART_WIDTH, chart_height);
    title(
        &mut svg,
        CHART_WIDTH,
        "Price Volatility by Commodity",
        "Coefficient of variation (%)",
    );

    let row_y = |i: usize| MARGIN_TOP + i as f64 * (BAR_HEIGHT + BAR_GAP);

    for (i, (name, cv)) in ranked.iter().enumerate() {
        let y = row_y(i);
        let width = cv / max_cv * plot_width;
        let color = blend(LOW, HIGH, cv / max_cv);
        text_el(&mut svg, MARGIN_LEFT - 8.0, y + BAR_HEIGHT * 0.7, "end", 11, name);
        svg.push_str(&format!(
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\" fill-opacity=\"0.8\"/>\n",
            MARGIN_LEFT, y, width, BAR_HEIGHT, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" font-weight=\"bold\" fill=\"#222\">{:.1}%</text>\n",
            MARGIN_LEFT + width + 4.0,
            y + BAR_HEIGHT * 0.7,
            cv
        ));
    }

    for (j, name) in undefined.iter().enumerate() {
        let y = row_y(ranked.len() + j);
        text_el(&mut svg, MARGIN_LEFT - 8.0, y + BAR_HEIGHT * 0.7, "end", 11, name);
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" fill=\"{}\">n/a</text>\n",
            MARGIN_LEFT + 4.0,
            y + BAR_HEIGHT * 0.7,
            TEXT_COLOR
        ));
    }

    let axis_bottom = chart_height - MARGIN_BOTTOM;
    line_el(&mut svg, MARGIN_LEFT, MARGIN_TOP - 4.0, MARGIN_LEFT, axis_bottom, AXIS_COLOR);
    line_el(&mut svg, MARGIN_LEFT, axis_bottom, CHART_WIDTH - MARGIN_RIGHT, axis_bottom, AXIS_COLOR);
    text_el(&mut svg, MARGIN_LEFT, axis_bottom + 14.0, "middle", 10, "0%");
    text_el(
        &mut svg,
        CHART_WIDTH - MARGIN_RIGHT,
        axis_bottom + 14.0,
        "middle",
        10,
        &format!("{:.1}%", max_cv),
    );

    svg.push_str("</svg>");
    svg
}
