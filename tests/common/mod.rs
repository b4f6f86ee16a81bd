#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use pangan::adapters::rng_adapter::RngSource;
use pangan::domain::commodity::{CommodityCategory, CommodityDefinition, default_catalogue};
use pangan::domain::config_validation::PipelineConfig;
use pangan::domain::generator::{PriceModel, generate_series};
use pangan::domain::table::{DailyTable, assemble};
use std::path::Path;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn flat(name: &str, base_price: f64, category: CommodityCategory) -> CommodityDefinition {
    CommodityDefinition::new(name, base_price, 0.0, category)
}

/// Default catalogue over `[start, start + days)` with a seeded source.
pub fn seeded_table(seed: u64, start: NaiveDate, days: i64) -> DailyTable {
    let catalogue = default_catalogue();
    let end = start + Duration::days(days - 1);
    let mut rng = RngSource::seeded(seed);
    let observations =
        generate_series(start, end, &catalogue, &PriceModel::default(), &mut rng).unwrap();
    assemble(&observations, &catalogue).unwrap()
}

/// Defaults pointed at `dir`, over a short window so tests stay quick.
pub fn short_config(dir: &Path) -> PipelineConfig {
    PipelineConfig {
        start_date: date("2024-11-15"),
        end_date: date("2025-03-14"),
        seed: Some(42),
        output_dir: dir.to_path_buf(),
        ..PipelineConfig::default()
    }
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
