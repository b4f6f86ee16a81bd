//! Tabular export port.

use crate::domain::error::PanganError;
use crate::domain::statistics::StatisticsTable;
use crate::domain::table::DailyTable;
use crate::domain::trend::MonthlyAggregate;
use std::path::PathBuf;

pub trait ExportPort {
    fn write_daily(&self, table: &DailyTable) -> Result<PathBuf, PanganError>;

    fn write_monthly(&self, monthly: &MonthlyAggregate) -> Result<PathBuf, PanganError>;

    fn write_statistics(&self, stats: &StatisticsTable) -> Result<PathBuf, PanganError>;

    /// Default implementation: daily, monthly, then statistics.
    fn write_all(
        &self,
        table: &DailyTable,
        monthly: &MonthlyAggregate,
        stats: &StatisticsTable,
    ) -> Result<Vec<PathBuf>, PanganError> {
        Ok(vec![
            self.write_daily(table)?,
            self.write_monthly(monthly)?,
            self.write_statistics(stats)?,
        ])
    }
}
