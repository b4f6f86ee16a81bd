//! Commodity definitions and the default PIHPS-style catalogue.

use crate::domain::error::PanganError;
use std::fmt;

/// Category tag driving category-specific seasonal effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommodityCategory {
    Staple,
    Oil,
    Chili,
    Allium,
    Protein,
    Sugar,
}

impl CommodityCategory {
    /// Categories with administered or subsidised prices.
    pub fn is_price_supported(&self) -> bool {
        matches!(self, CommodityCategory::Staple | CommodityCategory::Sugar)
    }
}

impl fmt::Display for CommodityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CommodityCategory::Staple => "staple",
            CommodityCategory::Oil => "oil",
            CommodityCategory::Chili => "chili",
            CommodityCategory::Allium => "allium",
            CommodityCategory::Protein => "protein",
            CommodityCategory::Sugar => "sugar",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommodityDefinition {
    pub name: String,
    pub base_price: f64,
    pub volatility: f64,
    pub category: CommodityCategory,
}

impl CommodityDefinition {
    pub fn new(
        name: impl Into<String>,
        base_price: f64,
        volatility: f64,
        category: CommodityCategory,
    ) -> Self {
        Self {
            name: name.into(),
            base_price,
            volatility,
            category,
        }
    }

    /// Base price must be positive; volatility must lie in [0, 1).
    pub fn validate(&self) -> Result<(), PanganError> {
        if self.name.trim().is_empty() {
            return Err(PanganError::Generation {
                commodity: self.name.clone(),
                reason: "name must not be empty".into(),
            });
        }
        if !self.base_price.is_finite() || self.base_price <= 0.0 {
            return Err(PanganError::Generation {
                commodity: self.name.clone(),
                reason: format!("base price must be positive, got {}", self.base_price),
            });
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 || self.volatility >= 1.0 {
            return Err(PanganError::Generation {
                commodity: self.name.clone(),
                reason: format!(
                    "volatility must be within [0, 1), got {}",
                    self.volatility
                ),
            });
        }
        Ok(())
    }
}

/// The ten commodities tracked by the national food-price panel.
pub fn default_catalogue() -> Vec<CommodityDefinition> {
    use CommodityCategory::*;
    vec![
        CommodityDefinition::new("Beras Premium", 15_500.0, 0.02, Staple),
        CommodityDefinition::new("Beras Medium", 13_500.0, 0.02, Staple),
        CommodityDefinition::new("Minyak Goreng Kemasan", 16_000.0, 0.08, Oil),
        CommodityDefinition::new("Cabai Merah Besar", 50_000.0, 0.25, Chili),
        CommodityDefinition::new("Cabai Rawit Merah", 45_000.0, 0.22, Chili),
        CommodityDefinition::new("Bawang Merah", 38_000.0, 0.18, Allium),
        CommodityDefinition::new("Bawang Putih Bonggol", 36_000.0, 0.12, Allium),
        CommodityDefinition::new("Telur Ayam Ras", 28_000.0, 0.10, Protein),
        CommodityDefinition::new("Daging Ayam Ras", 38_000.0, 0.08, Protein),
        CommodityDefinition::new("Gula Pasir Premium", 17_000.0, 0.05, Sugar),
    ]
}

/// Validate a whole catalogue; names must be unique.
pub fn validate_catalogue(commodities: &[CommodityDefinition]) -> Result<(), PanganError> {
    for (i, c) in commodities.iter().enumerate() {
        c.validate()?;
        if commodities[..i].iter().any(|prev| prev.name == c.name) {
            return Err(PanganError::Generation {
                commodity: c.name.clone(),
                reason: "duplicate commodity name".into(),
            });
        }
    }
    Ok(())
}

pub fn find<'a>(
    commodities: &'a [CommodityDefinition],
    name: &str,
) -> Option<&'a CommodityDefinition> {
    commodities.iter().find(|c| c.name == name)
}
