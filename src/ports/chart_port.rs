//! Chart rendering port.

use crate::domain::correlation::CorrelationMatrix;
use crate::domain::distribution::BoxSummary;
use crate::domain::error::PanganError;
use crate::domain::statistics::StatisticsTable;
use crate::domain::table::DailyTable;
use std::path::PathBuf;

/// Commodity and year whose monthly distribution is plotted.
pub struct DistributionSpec<'a> {
    pub commodity: &'a str,
    pub year: i32,
    pub summaries: &'a [BoxSummary],
}

/// Port for producing chart artifacts. Each method returns the path written.
pub trait ChartPort {
    fn price_trend(
        &self,
        table: &DailyTable,
        commodities: &[String],
    ) -> Result<PathBuf, PanganError>;

    fn volatility(&self, stats: &StatisticsTable) -> Result<PathBuf, PanganError>;

    fn correlation(&self, matrix: &CorrelationMatrix) -> Result<PathBuf, PanganError>;

    fn monthly_distribution(&self, spec: &DistributionSpec) -> Result<PathBuf, PanganError>;
}
