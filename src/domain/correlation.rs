//! Pairwise Pearson correlation across commodity columns.

use crate::domain::table::DailyTable;

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// Row-major, `labels.len()` squared.
    values: Vec<f64>,
}

impl CorrelationMatrix {
    pub fn compute(table: &DailyTable) -> Self {
        let labels = table.commodities().to_vec();
        let n = labels.len();
        let columns: Vec<Vec<f64>> = (0..n).map(|i| table.column_at(i)).collect();

        let mut values = vec![f64::NAN; n * n];
        for i in 0..n {
            values[i * n + i] = 1.0;
            for j in (i + 1)..n {
                let r = pearson(&columns[i], &columns[j]);
                values[i * n + j] = r;
                values[j * n + i] = r;
            }
        }

        Self { labels, values }
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.labels.len() + col]
    }
}

/// NaN when either series has zero variance or the lengths differ.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return f64::NAN;
    }
    let n = x.len() as f64;
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }

    if vx == 0.0 || vy == 0.0 {
        return f64::NAN;
    }
    (cov / (vx * vy).sqrt()).clamp(-1.0, 1.0)
}
