//! Monthly aggregation and first-vs-last period growth.

use crate::domain::error::PanganError;
use crate::domain::table::DailyTable;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPeriod {
    pub year: i32,
    pub month: u32,
    /// Mean price per commodity, in column order.
    pub means: Vec<f64>,
    /// Number of daily rows averaged.
    pub days: usize,
}

impl MonthlyPeriod {
    /// "YYYY-MM"
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// Per-commodity monthly means in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAggregate {
    commodities: Vec<String>,
    periods: Vec<MonthlyPeriod>,
}

impl MonthlyAggregate {
    /// Groups consecutive rows by (year, month). The table is contiguous and
    /// ascending, so each month forms one run.
    pub fn compute(table: &DailyTable) -> Self {
        let width = table.commodities().len();
        let mut periods: Vec<MonthlyPeriod> = Vec::new();
        let mut sums = vec![0.0; width];
        let mut count = 0usize;

        for (i, row) in table.rows().iter().enumerate() {
            for (sum, price) in sums.iter_mut().zip(&row.prices) {
                *sum += price;
            }
            count += 1;

            let closes_month = table
                .rows()
                .get(i + 1)
                .is_none_or(|next| (next.year, next.month) != (row.year, row.month));
            if closes_month {
                periods.push(MonthlyPeriod {
                    year: row.year,
                    month: row.month,
                    means: sums.iter().map(|s| s / count as f64).collect(),
                    days: count,
                });
                sums.iter_mut().for_each(|s| *s = 0.0);
                count = 0;
            }
        }

        Self {
            commodities: table.commodities().to_vec(),
            periods,
        }
    }

    pub fn commodities(&self) -> &[String] {
        &self.commodities
    }

    pub fn periods(&self) -> &[MonthlyPeriod] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn series(&self, commodity: &str) -> Result<Vec<f64>, PanganError> {
        let idx = self
            .commodities
            .iter()
            .position(|c| c == commodity)
            .ok_or_else(|| PanganError::UnknownCommodity(commodity.to_string()))?;
        Ok(self.periods.iter().map(|p| p.means[idx]).collect())
    }

    /// Percentage change from the first to the last period per commodity.
    /// A zero baseline aborts the whole computation.
    pub fn growth(&self) -> Result<GrowthMap, PanganError> {
        let (first, last) = match (self.periods.first(), self.periods.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(PanganError::EmptyAggregate),
        };

        let mut entries = Vec::with_capacity(self.commodities.len());
        for (i, name) in self.commodities.iter().enumerate() {
            let base = first.means[i];
            if base == 0.0 {
                return Err(PanganError::Trend {
                    commodity: name.clone(),
                    period: first.label(),
                    reason: "first period value is zero".into(),
                });
            }
            entries.push((name.clone(), (last.means[i] - base) / base * 100.0));
        }

        Ok(GrowthMap {
            first_period: first.label(),
            last_period: last.label(),
            entries,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthMap {
    pub first_period: String,
    pub last_period: String,
    entries: Vec<(String, f64)>,
}

impl GrowthMap {
    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn get(&self, commodity: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == commodity)
            .map(|(_, g)| *g)
    }

    /// Highest growth first; ties keep column order.
    pub fn top(&self, k: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> =
            self.entries.iter().map(|(n, g)| (n.as_str(), *g)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(k);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Datelike, Duration, NaiveDate};

    fn table_from(start: NaiveDate, days: usize, f: impl Fn(NaiveDate) -> Vec<f64>, names: &[&str]) -> DailyTable {
        let rows = (0..days)
            .map(|i| {
                let d = start + Duration::days(i as i64);
                (d, f(d))
            })
            .collect();
        DailyTable::new(names.iter().map(|s| s.to_string()).collect(), rows).unwrap()
    }

    #[test]
    fn groups_by_calendar_month() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
        // Jan 30, 31, Feb 1..29, Mar 1
        let table = table_from(start, 32, |d| vec![d.day() as f64], &["A"]);
        let agg = MonthlyAggregate::compute(&table);

        assert_eq!(agg.len(), 3);
        let labels: Vec<String> = agg.periods().iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["2024-01", "2024-02", "2024-03"]);
        assert_relative_eq!(agg.periods()[0].means[0], 30.5);
        assert_relative_eq!(agg.periods()[1].means[0], 15.0);
        assert_eq!(agg.periods()[1].days, 29);
        assert_relative_eq!(agg.periods()[2].means[0], 1.0);
    }

    #[test]
    fn constant_prices_have_zero_growth() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let table = table_from(start, 120, |_| vec![15_500.0, 3.0], &["A", "B"]);
        let growth = MonthlyAggregate::compute(&table).growth().unwrap();
        assert_eq!(growth.get("A"), Some(0.0));
        assert_eq!(growth.get("B"), Some(0.0));
        assert_eq!(growth.first_period, "2024-01");
        assert_eq!(growth.last_period, "2024-04");
    }

    #[test]
    fn growth_between_first_and_last_month() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let table = table_from(
            start,
            60,
            |d| if d.month() == 1 { vec![100.0] } else { vec![125.0] },
            &["A"],
        );
        let growth = MonthlyAggregate::compute(&table).growth().unwrap();
        assert_relative_eq!(growth.get("A").unwrap(), 25.0);
    }

    #[test]
    fn zero_baseline_is_an_error() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let table = table_from(
            start,
            40,
            |d| if d.month() == 1 { vec![5.0, 0.0] } else { vec![6.0, 1.0] },
            &["Ok", "Zero"],
        );
        let err = MonthlyAggregate::compute(&table).growth().unwrap_err();
        match err {
            PanganError::Trend {
                commodity, period, ..
            } => {
                assert_eq!(commodity, "Zero");
                assert_eq!(period, "2024-01");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_aggregate_is_an_error() {
        let agg = MonthlyAggregate {
            commodities: vec!["A".into()],
            periods: vec![],
        };
        assert!(matches!(agg.growth(), Err(PanganError::EmptyAggregate)));
    }

    #[test]
    fn top_growth_sorted_descending() {
        let growth = GrowthMap {
            first_period: "2024-01".into(),
            last_period: "2025-11".into(),
            entries: vec![("A".into(), 1.0), ("B".into(), 9.0), ("C".into(), -3.0)],
        };
        assert_eq!(growth.top(2), vec![("B", 9.0), ("A", 1.0)]);
    }

    #[test]
    fn series_by_name() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let table = table_from(start, 31, |_| vec![1.0, 2.0], &["A", "B"]);
        let agg = MonthlyAggregate::compute(&table);
        assert_eq!(agg.series("B").unwrap(), vec![2.0]);
        assert!(agg.series("Z").is_err());
    }
}
