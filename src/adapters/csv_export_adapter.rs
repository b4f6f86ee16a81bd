//! CSV file export adapter.

use crate::domain::error::PanganError;
use crate::domain::statistics::{StatisticsTable, round_to};
use crate::domain::table::DailyTable;
use crate::domain::trend::MonthlyAggregate;
use crate::ports::export_port::ExportPort;
use std::fs;
use std::path::PathBuf;

pub const DAILY_FILE: &str = "daily_prices.csv";
pub const MONTHLY_FILE: &str = "monthly_summary.csv";
pub const STATISTICS_FILE: &str = "price_statistics.csv";

pub struct CsvExportAdapter {
    output_dir: PathBuf,
}

impl CsvExportAdapter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn writer(&self, file_name: &str) -> Result<(csv::Writer<fs::File>, PathBuf), PanganError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(file_name);
        Ok((csv::Writer::from_path(&path)?, path))
    }
}

/// Shortest round-trip text; whole prices print without a fraction.
fn num(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}

impl ExportPort for CsvExportAdapter {
    fn write_daily(&self, table: &DailyTable) -> Result<PathBuf, PanganError> {
        let (mut wtr, path) = self.writer(DAILY_FILE)?;

        let mut header = vec!["Date".to_string()];
        header.extend(table.commodities().iter().cloned());
        header.extend(["Year", "Month", "Month Name"].map(String::from));
        wtr.write_record(&header)?;

        for row in table.rows() {
            let mut record = Vec::with_capacity(header.len());
            record.push(row.date.format("%Y-%m-%d").to_string());
            record.extend(row.prices.iter().map(|p| num(*p)));
            record.push(row.year.to_string());
            record.push(row.month.to_string());
            record.push(row.month_label.clone());
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(path)
    }

    fn write_monthly(&self, monthly: &MonthlyAggregate) -> Result<PathBuf, PanganError> {
        let (mut wtr, path) = self.writer(MONTHLY_FILE)?;

        let mut header = vec!["Year".to_string(), "Month".to_string()];
        header.extend(monthly.commodities().iter().cloned());
        header.push("Period".to_string());
        wtr.write_record(&header)?;

        for period in monthly.periods() {
            let mut record = Vec::with_capacity(header.len());
            record.push(period.year.to_string());
            record.push(period.month.to_string());
            record.extend(period.means.iter().map(|m| num(round_to(*m, 2))));
            record.push(period.label());
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(path)
    }

    fn write_statistics(&self, stats: &StatisticsTable) -> Result<PathBuf, PanganError> {
        let (mut wtr, path) = self.writer(STATISTICS_FILE)?;

        wtr.write_record(["Commodity", "Mean", "Std Dev", "Min", "Max", "CV (%)"])?;
        for (name, s) in stats.entries() {
            wtr.write_record([
                name.clone(),
                num(round_to(s.mean, 2)),
                num(round_to(s.std_dev, 2)),
                num(s.min),
                num(s.max),
                s.cv.map(num).unwrap_or_default(),
            ])?;
        }

        wtr.flush()?;
        Ok(path)
    }
}
