//! Synthetic daily price series.
//!
//! price = base × trend × (1 + seasonal + random) × event × category
//!
//! - trend    = 1 + month_index × drift, month_index = elapsed days / 30
//! - seasonal = sin(month_index × 2π / 12) × volatility
//! - random   = (U − 0.5) × volatility, U uniform in [0, 1)
//! - event    = holiday demand spike for every commodity (March, April)
//! - category = rainy-season spike for chili commodities (Dec–Feb)
//!
//! Prices are rounded to the nearest whole currency unit, ties to even.
//! No floor is applied.

use crate::domain::commodity::{CommodityCategory, CommodityDefinition, validate_catalogue};
use crate::domain::error::PanganError;
use crate::ports::random_port::RandomSource;
use chrono::{Datelike, NaiveDate};
use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub commodity: String,
    pub price: f64,
}

/// A multiplier active during a fixed set of calendar months.
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeWindow {
    pub months: Vec<u32>,
    pub multiplier: f64,
}

impl SpikeWindow {
    pub fn factor(&self, month: u32) -> f64 {
        if self.months.contains(&month) {
            self.multiplier
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceModel {
    pub days_per_month: f64,
    pub monthly_drift: f64,
    pub seasonal_period_months: f64,
    pub holiday_spike: SpikeWindow,
    pub chili_spike: SpikeWindow,
}

impl Default for PriceModel {
    fn default() -> Self {
        Self {
            days_per_month: 30.0,
            monthly_drift: 0.003,
            seasonal_period_months: 12.0,
            holiday_spike: SpikeWindow {
                months: vec![3, 4],
                multiplier: 1.15,
            },
            chili_spike: SpikeWindow {
                months: vec![12, 1, 2],
                multiplier: 1.20,
            },
        }
    }
}

impl PriceModel {
    pub fn month_index(&self, start: NaiveDate, date: NaiveDate) -> f64 {
        (date - start).num_days() as f64 / self.days_per_month
    }

    pub fn trend(&self, month_index: f64) -> f64 {
        1.0 + month_index * self.monthly_drift
    }

    pub fn seasonal(&self, month_index: f64, volatility: f64) -> f64 {
        (month_index * 2.0 * PI / self.seasonal_period_months).sin() * volatility
    }

    pub fn category_factor(&self, category: CommodityCategory, month: u32) -> f64 {
        match category {
            CommodityCategory::Chili => self.chili_spike.factor(month),
            _ => 1.0,
        }
    }

    /// Unrounded price for one (date, commodity) given the uniform draw `u`.
    pub fn raw_price(
        &self,
        commodity: &CommodityDefinition,
        start: NaiveDate,
        date: NaiveDate,
        u: f64,
    ) -> f64 {
        let month_index = self.month_index(start, date);
        let vol = commodity.volatility;
        let random_term = (u - 0.5) * vol;
        commodity.base_price
            * self.trend(month_index)
            * (1.0 + self.seasonal(month_index, vol) + random_term)
            * self.holiday_spike.factor(date.month())
            * self.category_factor(commodity.category, date.month())
    }

    pub fn price(
        &self,
        commodity: &CommodityDefinition,
        start: NaiveDate,
        date: NaiveDate,
        u: f64,
    ) -> f64 {
        self.raw_price(commodity, start, date, u).round_ties_even()
    }
}

/// One observation per (date, commodity) over the inclusive range, dates
/// ascending and commodities in catalogue order within each date. One draw is
/// consumed per observation in that order.
pub fn generate_series<R: RandomSource>(
    start: NaiveDate,
    end: NaiveDate,
    commodities: &[CommodityDefinition],
    model: &PriceModel,
    rng: &mut R,
) -> Result<Vec<DailyObservation>, PanganError> {
    if start > end {
        return Err(PanganError::InvalidDateRange { start, end });
    }
    validate_catalogue(commodities)?;

    let days = (end - start).num_days() as usize + 1;
    let mut observations = Vec::with_capacity(days * commodities.len());

    for date in start.iter_days().take(days) {
        for commodity in commodities {
            let u = rng.next_unit();
            observations.push(DailyObservation {
                date,
                commodity: commodity.name.clone(),
                price: model.price(commodity, start, date, u),
            });
        }
    }

    Ok(observations)
}
