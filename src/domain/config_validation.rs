//! Pipeline configuration: parsing from a [`ConfigPort`] and validation.
//!
//! Every key is optional; absent keys fall back to the compiled-in defaults
//! of [`PipelineConfig::default`]. Present keys must parse, and the assembled
//! config is validated against the commodity catalogue before anything runs.

use crate::domain::commodity::{CommodityDefinition, find};
use crate::domain::error::PanganError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_TREND_COMMODITIES: [&str; 5] = [
    "Cabai Merah Besar",
    "Cabai Rawit Merah",
    "Bawang Merah",
    "Daging Ayam Ras",
    "Beras Premium",
];

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub top_k: usize,
    pub trend_commodities: Vec<String>,
    pub distribution_commodity: String,
    pub distribution_year: i32,
    pub output_dir: PathBuf,
    pub charts: bool,
    pub export: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2025, 11, 30).unwrap_or_default(),
            seed: None,
            top_k: 3,
            trend_commodities: DEFAULT_TREND_COMMODITIES.map(String::from).to_vec(),
            distribution_commodity: "Cabai Merah Besar".to_string(),
            distribution_year: 2025,
            output_dir: PathBuf::from("."),
            charts: true,
            export: true,
        }
    }
}

/// Read every known key, keeping defaults for the absent ones.
pub fn build_pipeline_config(config: &dyn ConfigPort) -> Result<PipelineConfig, PanganError> {
    let mut cfg = PipelineConfig::default();

    if let Some(d) = config.get_string("dataset", "start_date") {
        cfg.start_date = parse_date(&d, "dataset", "start_date")?;
    }
    if let Some(d) = config.get_string("dataset", "end_date") {
        cfg.end_date = parse_date(&d, "dataset", "end_date")?;
    }
    if let Some(s) = config.get_string("dataset", "seed") {
        cfg.seed = Some(parse_value(&s, "dataset", "seed")?);
    }
    if let Some(k) = config.get_string("analysis", "top_k") {
        cfg.top_k = parse_value(&k, "analysis", "top_k")?;
    }
    if let Some(list) = config.get_list("charts", "trend_commodities") {
        cfg.trend_commodities = list;
    }
    if let Some(name) = config.get_string("charts", "distribution_commodity") {
        cfg.distribution_commodity = name;
    }
    if let Some(y) = config.get_string("charts", "distribution_year") {
        cfg.distribution_year = parse_value(&y, "charts", "distribution_year")?;
    }
    if let Some(dir) = config.get_string("output", "dir") {
        cfg.output_dir = PathBuf::from(dir);
    }
    cfg.charts = config.get_bool("output", "charts", cfg.charts);
    cfg.export = config.get_bool("output", "export", cfg.export);

    Ok(cfg)
}

pub fn validate_pipeline_config(
    cfg: &PipelineConfig,
    catalogue: &[CommodityDefinition],
) -> Result<(), PanganError> {
    validate_dates(cfg)?;
    validate_top_k(cfg)?;
    validate_commodities(cfg, catalogue)?;
    Ok(())
}

fn validate_dates(cfg: &PipelineConfig) -> Result<(), PanganError> {
    if cfg.start_date > cfg.end_date {
        return Err(PanganError::ConfigInvalid {
            section: "dataset".to_string(),
            key: "start_date".to_string(),
            reason: format!(
                "start_date {} is after end_date {}",
                cfg.start_date, cfg.end_date
            ),
        });
    }
    Ok(())
}

fn validate_top_k(cfg: &PipelineConfig) -> Result<(), PanganError> {
    if cfg.top_k < 1 {
        return Err(PanganError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "top_k".to_string(),
            reason: "top_k must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_commodities(
    cfg: &PipelineConfig,
    catalogue: &[CommodityDefinition],
) -> Result<(), PanganError> {
    if cfg.trend_commodities.is_empty() {
        return Err(PanganError::ConfigInvalid {
            section: "charts".to_string(),
            key: "trend_commodities".to_string(),
            reason: "at least one commodity is required".to_string(),
        });
    }
    for name in &cfg.trend_commodities {
        require_known(catalogue, name)?;
    }
    require_known(catalogue, &cfg.distribution_commodity)
}

fn require_known(catalogue: &[CommodityDefinition], name: &str) -> Result<(), PanganError> {
    find(catalogue, name)
        .map(|_| ())
        .ok_or_else(|| PanganError::UnknownCommodity(name.to_string()))
}

fn parse_date(value: &str, section: &str, key: &str) -> Result<NaiveDate, PanganError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| PanganError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("invalid date '{}', expected YYYY-MM-DD", value),
    })
}

fn parse_value<T: FromStr>(value: &str, section: &str, key: &str) -> Result<T, PanganError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| PanganError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("'{}': {}", value, e),
    })
}
