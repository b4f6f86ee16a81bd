//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for pangan.
#[derive(Debug, thiserror::Error)]
pub enum PanganError {
    #[error("invalid commodity definition {commodity}: {reason}")]
    Generation { commodity: String, reason: String },

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("incomplete dataset on {date}: {reason}")]
    Assembly { date: NaiveDate, reason: String },

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("cannot compute growth for {commodity} in {period}: {reason}")]
    Trend {
        commodity: String,
        period: String,
        reason: String,
    },

    #[error("monthly aggregate is empty")]
    EmptyAggregate,

    #[error("unknown commodity: {0}")]
    UnknownCommodity(String),

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PanganError> for std::process::ExitCode {
    fn from(err: &PanganError) -> Self {
        let code: u8 = match err {
            PanganError::Io(_) | PanganError::Csv(_) => 1,
            PanganError::ConfigParse { .. }
            | PanganError::ConfigMissing { .. }
            | PanganError::ConfigInvalid { .. } => 2,
            PanganError::Generation { .. } | PanganError::InvalidDateRange { .. } => 3,
            PanganError::Assembly { .. } | PanganError::EmptyDataset => 4,
            PanganError::Trend { .. }
            | PanganError::EmptyAggregate
            | PanganError::UnknownCommodity(_) => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembly_message_names_date() {
        let err = PanganError::Assembly {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            reason: "missing value for Bawang Merah".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2024-03-05"));
        assert!(msg.contains("Bawang Merah"));
    }

    #[test]
    fn trend_message_names_commodity_and_period() {
        let err = PanganError::Trend {
            commodity: "Gula Pasir Premium".into(),
            period: "2024-01".into(),
            reason: "first period value is zero".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot compute growth for Gula Pasir Premium in 2024-01: first period value is zero"
        );
    }

    #[test]
    fn exit_codes_by_category() {
        use std::process::ExitCode;
        let gen_err = PanganError::Generation {
            commodity: "X".into(),
            reason: "bad".into(),
        };
        assert_eq!(ExitCode::from(&gen_err), ExitCode::from(3));
        assert_eq!(ExitCode::from(&PanganError::EmptyAggregate), ExitCode::from(5));
        let cfg = PanganError::ConfigMissing {
            section: "dataset".into(),
            key: "start_date".into(),
        };
        assert_eq!(ExitCode::from(&cfg), ExitCode::from(2));
    }
}
