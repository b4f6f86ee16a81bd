//! Daily Table: one row per calendar date, one column per commodity.

use crate::domain::commodity::CommodityDefinition;
use crate::domain::error::PanganError;
use crate::domain::generator::DailyObservation;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    /// "%B %Y", e.g. "March 2025".
    pub month_label: String,
    /// One price per commodity, in column order.
    pub prices: Vec<f64>,
}

impl DailyRow {
    fn new(date: NaiveDate, prices: Vec<f64>) -> Self {
        Self {
            date,
            year: date.year(),
            month: date.month(),
            month_label: date.format("%B %Y").to_string(),
            prices,
        }
    }
}

/// Rows are contiguous and strictly ascending by date; every row carries a
/// value for every column. Both are enforced at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTable {
    commodities: Vec<String>,
    rows: Vec<DailyRow>,
}

impl DailyTable {
    pub fn new(
        commodities: Vec<String>,
        rows: Vec<(NaiveDate, Vec<f64>)>,
    ) -> Result<Self, PanganError> {
        if rows.is_empty() {
            return Err(PanganError::EmptyDataset);
        }

        let mut out = Vec::with_capacity(rows.len());
        let mut prev: Option<NaiveDate> = None;

        for (date, prices) in rows {
            if prices.len() != commodities.len() {
                return Err(PanganError::Assembly {
                    date,
                    reason: format!(
                        "row has {} values, expected {}",
                        prices.len(),
                        commodities.len()
                    ),
                });
            }
            if let Some(p) = prev {
                if p.succ_opt() != Some(date) {
                    return Err(PanganError::Assembly {
                        date,
                        reason: format!("not the day after previous row {p}"),
                    });
                }
            }
            prev = Some(date);
            out.push(DailyRow::new(date, prices));
        }

        Ok(Self {
            commodities,
            rows: out,
        })
    }

    pub fn commodities(&self) -> &[String] {
        &self.commodities
    }

    pub fn rows(&self) -> &[DailyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.rows[0].date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.rows[self.rows.len() - 1].date
    }

    pub fn column_index(&self, commodity: &str) -> Option<usize> {
        self.commodities.iter().position(|c| c == commodity)
    }

    pub fn column_at(&self, index: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r.prices[index]).collect()
    }

    pub fn column(&self, commodity: &str) -> Result<Vec<f64>, PanganError> {
        self.column_index(commodity)
            .map(|i| self.column_at(i))
            .ok_or_else(|| PanganError::UnknownCommodity(commodity.to_string()))
    }
}

/// Pivot generator output into a [`DailyTable`] with columns in catalogue
/// order. Unknown commodities, duplicates, missing values and date gaps are
/// rejected; nothing is filled in.
pub fn assemble(
    observations: &[DailyObservation],
    commodities: &[CommodityDefinition],
) -> Result<DailyTable, PanganError> {
    let names: Vec<String> = commodities.iter().map(|c| c.name.clone()).collect();
    let mut by_date: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();

    for obs in observations {
        let idx = names
            .iter()
            .position(|n| *n == obs.commodity)
            .ok_or_else(|| PanganError::Assembly {
                date: obs.date,
                reason: format!("unknown commodity {}", obs.commodity),
            })?;
        let slots = by_date
            .entry(obs.date)
            .or_insert_with(|| vec![None; names.len()]);
        if slots[idx].is_some() {
            return Err(PanganError::Assembly {
                date: obs.date,
                reason: format!("duplicate value for {}", obs.commodity),
            });
        }
        slots[idx] = Some(obs.price);
    }

    let mut rows = Vec::with_capacity(by_date.len());
    for (date, slots) in by_date {
        let mut prices = Vec::with_capacity(slots.len());
        for (name, slot) in names.iter().zip(slots) {
            match slot {
                Some(p) => prices.push(p),
                None => {
                    return Err(PanganError::Assembly {
                        date,
                        reason: format!("missing value for {name}"),
                    });
                }
            }
        }
        rows.push((date, prices));
    }

    DailyTable::new(names, rows)
}
