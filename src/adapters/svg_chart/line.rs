//! Multi-series daily price chart.

use super::{
    AXIS_COLOR, PALETTE, escape, fmt_thousands, line_el, svg_open, text_el, title,
};
use crate::domain::error::PanganError;
use crate::domain::table::DailyTable;

const CHART_WIDTH: f64 = 1000.0;
const CHART_HEIGHT: f64 = 420.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 40.0;
const Y_TICKS: usize = 5;

pub fn render_price_trend(
    table: &DailyTable,
    commodities: &[String],
) -> Result<String, PanganError> {
    let series: Vec<(&String, Vec<f64>)> = commodities
        .iter()
        .map(|name| table.column(name).map(|values| (name, values)))
        .collect::<Result<_, _>>()?;

    let (min_price, max_price) = series
        .iter()
        .flat_map(|(_, v)| v.iter().copied())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let (min_price, max_price) = if min_price.is_finite() {
        (min_price, max_price)
    } else {
        (0.0, 1.0)
    };
    let range = (max_price - min_price).max(1.0);

    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let n = table.len();

    let x_scale = |i: usize| -> f64 { MARGIN_LEFT + (i as f64 / (n - 1).max(1) as f64) * plot_width };
    let y_scale =
        |v: f64| -> f64 { MARGIN_TOP + plot_height - ((v - min_price) / range) * plot_height };

    let mut svg = svg_open(CHART_WIDTH, CHART_HEIGHT);
    title(
        &mut svg,
        CHART_WIDTH,
        &format!(
            "Food Price Trend {}-{}",
            table.start_date().format("%Y"),
            table.end_date().format("%Y")
        ),
        &format!("{} key commodities, Rp/kg", series.len()),
    );

    // Axes and horizontal grid
    line_el(&mut svg, MARGIN_LEFT, MARGIN_TOP, MARGIN_LEFT, CHART_HEIGHT - MARGIN_BOTTOM, AXIS_COLOR);
    for t in 0..=Y_TICKS {
        let v = min_price + range * t as f64 / Y_TICKS as f64;
        let y = y_scale(v);
        line_el(&mut svg, MARGIN_LEFT, y, CHART_WIDTH - MARGIN_RIGHT, y, "#eee");
        text_el(&mut svg, MARGIN_LEFT - 5.0, y + 4.0, "end", 10, &fmt_thousands(v));
    }
    line_el(
        &mut svg,
        MARGIN_LEFT,
        CHART_HEIGHT - MARGIN_BOTTOM,
        CHART_WIDTH - MARGIN_RIGHT,
        CHART_HEIGHT - MARGIN_BOTTOM,
        AXIS_COLOR,
    );

    // Date labels: start, middle, end
    let rows = table.rows();
    for i in [0, n / 2, n - 1] {
        text_el(
            &mut svg,
            x_scale(i),
            CHART_HEIGHT - MARGIN_BOTTOM + 16.0,
            "middle",
            10,
            &rows[i].date.to_string(),
        );
    }

    for (k, (name, values)) in series.iter().enumerate() {
        let color = PALETTE[k % PALETTE.len()];
        let mut path_data = String::with_capacity(values.len() * 16);
        for (i, v) in values.iter().enumerate() {
            let cmd = if i == 0 { "M" } else { " L" };
            path_data.push_str(&format!("{} {:.1} {:.1}", cmd, x_scale(i), y_scale(*v)));
        }
        svg.push_str(&format!(
            "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\" stroke-opacity=\"0.8\"/>\n",
            path_data, color
        ));

        // Legend, top left
        let ly = MARGIN_TOP + 8.0 + k as f64 * 16.0;
        svg.push_str(&format!(
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"12\" height=\"3\" fill=\"{}\"/>\n",
            MARGIN_LEFT + 10.0,
            ly - 4.0,
            color
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" fill=\"#333\">{}</text>\n",
            MARGIN_LEFT + 28.0,
            ly,
            escape(name)
        ));
    }

    svg.push_str("</svg>");
    Ok(svg)
}
