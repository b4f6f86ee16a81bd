//! Per-month box-plot statistics for one commodity in one calendar year.
//!
//! Quartiles interpolate linearly between order statistics; whiskers reach
//! the most extreme values within 1.5 × IQR of the box.

use crate::domain::error::PanganError;
use crate::domain::table::DailyTable;

const WHISKER_IQR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub month: u32,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// `None` for an empty sample.
    pub fn from_values(month: u32, values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let lo_fence = q1 - WHISKER_IQR * iqr;
        let hi_fence = q3 + WHISKER_IQR * iqr;

        let inside = || sorted.iter().copied().filter(|v| *v >= lo_fence && *v <= hi_fence);
        let whisker_low = inside().fold(f64::INFINITY, f64::min);
        let whisker_high = inside().fold(f64::NEG_INFINITY, f64::max);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < lo_fence || *v > hi_fence)
            .collect();

        Some(Self {
            month,
            count: sorted.len(),
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// One summary per month of `year` that has rows, January first.
pub fn monthly_distribution(
    table: &DailyTable,
    commodity: &str,
    year: i32,
) -> Result<Vec<BoxSummary>, PanganError> {
    let idx = table
        .column_index(commodity)
        .ok_or_else(|| PanganError::UnknownCommodity(commodity.to_string()))?;

    let mut by_month: [Vec<f64>; 12] = Default::default();
    for row in table.rows().iter().filter(|r| r.year == year) {
        by_month[(row.month - 1) as usize].push(row.prices[idx]);
    }

    Ok(by_month
        .iter()
        .enumerate()
        .filter_map(|(i, values)| BoxSummary::from_values(i as u32 + 1, values))
        .collect())
}
