//! Monthly box plot for a single commodity.

use super::{AXIS_COLOR, blend, fmt_thousands, line_el, svg_open, text_el, title};
use crate::ports::chart_port::DistributionSpec;

const CHART_WIDTH: f64 = 900.0;
const CHART_HEIGHT: f64 = 420.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 40.0;
const BOX_FILL: f64 = 0.6;
const Y_TICKS: usize = 4;

const LIGHT_RED: (u8, u8, u8) = (252, 187, 161);
const DARK_RED: (u8, u8, u8) = (165, 15, 21);
const MEAN_COLOR: &str = "#16a34a";

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn render_distribution(spec: &DistributionSpec) -> String {
    let mut svg = svg_open(CHART_WIDTH, CHART_HEIGHT);
    title(
        &mut svg,
        CHART_WIDTH,
        &format!("Monthly Price Distribution: {} ({})", spec.commodity, spec.year),
        "Box = interquartile range, whiskers = 1.5 x IQR, diamond = mean",
    );

    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let bottom = CHART_HEIGHT - MARGIN_BOTTOM;

    line_el(&mut svg, MARGIN_LEFT, MARGIN_TOP, MARGIN_LEFT, bottom, AXIS_COLOR);
    line_el(&mut svg, MARGIN_LEFT, bottom, CHART_WIDTH - MARGIN_RIGHT, bottom, AXIS_COLOR);

    if spec.summaries.is_empty() {
        text_el(
            &mut svg,
            CHART_WIDTH / 2.0,
            MARGIN_TOP + plot_height / 2.0,
            "middle",
            12,
            "no observations",
        );
        svg.push_str("</svg>");
        return svg;
    }

    let (lo, hi) = spec
        .summaries
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), b| {
            (lo.min(b.min), hi.max(b.max))
        });
    let range = (hi - lo).max(1.0);
    let y_scale = |v: f64| MARGIN_TOP + plot_height - ((v - lo) / range) * plot_height;

    for t in 0..=Y_TICKS {
        let v = lo + range * t as f64 / Y_TICKS as f64;
        text_el(&mut svg, MARGIN_LEFT - 5.0, y_scale(v) + 4.0, "end", 10, &fmt_thousands(v));
    }

    let slots = spec.summaries.len();
    let slot_width = plot_width / slots as f64;
    let box_width = slot_width * BOX_FILL;

    for (i, b) in spec.summaries.iter().enumerate() {
        let cx = MARGIN_LEFT + slot_width * (i as f64 + 0.5);
        let left = cx - box_width / 2.0;
        let right = cx + box_width / 2.0;
        let fill = blend(LIGHT_RED, DARK_RED, i as f64 / (slots - 1).max(1) as f64);

        // Whiskers with caps
        line_el(&mut svg, cx, y_scale(b.whisker_high), cx, y_scale(b.q3), "#444");
        line_el(&mut svg, cx, y_scale(b.q1), cx, y_scale(b.whisker_low), "#444");
        for w in [b.whisker_low, b.whisker_high] {
            let y = y_scale(w);
            line_el(&mut svg, cx - box_width / 4.0, y, cx + box_width / 4.0, y, "#444");
        }

        let top = y_scale(b.q3);
        svg.push_str(&format!(
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\" stroke=\"#444\" class=\"box\"/>\n",
            left,
            top,
            box_width,
            (y_scale(b.q1) - top).max(1.0),
            fill
        ));

        let my = y_scale(b.median);
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#111\" stroke-width=\"2\"/>\n",
            left, my, right, my
        ));

        for o in &b.outliers {
            svg.push_str(&format!(
                "  <circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"2.5\" fill=\"none\" stroke=\"#444\" class=\"outlier\"/>\n",
                cx,
                y_scale(*o)
            ));
        }

        let (mx, my) = (cx, y_scale(b.mean));
        svg.push_str(&format!(
            "  <path d=\"M {:.1} {:.1} L {:.1} {:.1} L {:.1} {:.1} L {:.1} {:.1} Z\" fill=\"{}\" class=\"mean\"/>\n",
            mx,
            my - 4.0,
            mx + 4.0,
            my,
            mx,
            my + 4.0,
            mx - 4.0,
            my,
            MEAN_COLOR
        ));

        let label = MONTH_ABBR
            .get(b.month.wrapping_sub(1) as usize)
            .copied()
            .unwrap_or("?");
        text_el(&mut svg, cx, bottom + 16.0, "middle", 10, label);
    }

    svg.push_str("</svg>");
    svg
}
