//! Descriptive statistics per commodity and volatility ranking.
//!
//! CV% = sample std-dev / mean × 100, rounded to 2 decimals. A column whose
//! mean is zero has an undefined CV (`None`); other columns are unaffected.

use crate::domain::table::DailyTable;

#[derive(Debug, Clone, PartialEq)]
pub struct CommodityStats {
    pub mean: f64,
    /// Sample standard deviation (N−1); NaN for a single observation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Coefficient of variation in percent.
    pub cv: Option<f64>,
}

impl CommodityStats {
    pub fn from_values(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self {
                mean: f64::NAN,
                std_dev: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                cv: None,
            };
        }

        let mean = values.iter().sum::<f64>() / n as f64;
        let std_dev = if n > 1 {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            f64::NAN
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            mean,
            std_dev,
            min,
            max,
            cv: coefficient_of_variation(mean, std_dev),
        }
    }
}

pub fn coefficient_of_variation(mean: f64, std_dev: f64) -> Option<f64> {
    if mean == 0.0 || !mean.is_finite() || !std_dev.is_finite() {
        return None;
    }
    Some(round_to(std_dev / mean * 100.0, 2))
}

/// Round half to even at `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Per-commodity statistics in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsTable {
    entries: Vec<(String, CommodityStats)>,
}

impl StatisticsTable {
    pub fn compute(table: &DailyTable) -> Self {
        let entries = table
            .commodities()
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), CommodityStats::from_values(&table.column_at(i))))
            .collect();
        Self { entries }
    }

    pub fn from_entries(entries: Vec<(String, CommodityStats)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, CommodityStats)] {
        &self.entries
    }

    pub fn get(&self, commodity: &str) -> Option<&CommodityStats> {
        self.entries
            .iter()
            .find(|(name, _)| name == commodity)
            .map(|(_, s)| s)
    }

    /// Commodities whose CV could not be computed.
    pub fn undefined_cv(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, s)| s.cv.is_none())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// All commodities with a defined CV, ascending; ties keep column order.
    pub fn by_cv_ascending(&self) -> Vec<(&str, f64)> {
        let mut ranked = self.defined_cvs();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked
    }

    /// Top `k` by CV descending; ties keep column order.
    pub fn most_volatile(&self, k: usize) -> Vec<(&str, f64)> {
        let mut ranked = self.defined_cvs();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(k);
        ranked
    }

    /// Bottom `k` by CV ascending; ties keep column order.
    pub fn most_stable(&self, k: usize) -> Vec<(&str, f64)> {
        let mut ranked = self.by_cv_ascending();
        ranked.truncate(k);
        ranked
    }

    fn defined_cvs(&self) -> Vec<(&str, f64)> {
        self.entries
            .iter()
            .filter_map(|(name, s)| s.cv.map(|cv| (name.as_str(), cv)))
            .collect()
    }
}
