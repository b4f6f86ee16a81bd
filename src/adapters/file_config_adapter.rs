//! INI file configuration adapter.

use crate::domain::error::PanganError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PanganError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| PanganError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, PanganError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| PanganError::ConfigParse {
                file: "<string>".into(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config
            .get(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.get_string(section, key)
            .as_deref()
            .and_then(Self::parse_bool)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[dataset]
start_date = 2024-01-01
end_date = 2025-11-30

[charts]
distribution_commodity = Cabai Rawit Merah
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("dataset", "start_date"),
            Some("2024-01-01".to_string())
        );
        assert_eq!(
            adapter.get_string("charts", "distribution_commodity"),
            Some("Cabai Rawit Merah".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_or_blank_key() {
        let adapter =
            FileConfigAdapter::from_string("[dataset]\nseed = 42\nend_date =\n").unwrap();
        assert_eq!(adapter.get_string("dataset", "missing"), None);
        assert_eq!(adapter.get_string("dataset", "end_date"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_list_splits_on_commas() {
        let adapter = FileConfigAdapter::from_string(
            "[charts]\ntrend_commodities = Beras Premium, Bawang Merah ,,Telur Ayam Ras\n",
        )
        .unwrap();
        assert_eq!(
            adapter.get_list("charts", "trend_commodities"),
            Some(vec![
                "Beras Premium".to_string(),
                "Bawang Merah".to_string(),
                "Telur Ayam Ras".to_string(),
            ])
        );
        assert_eq!(adapter.get_list("charts", "missing"), None);
    }

    #[test]
    fn get_bool_returns_true_values() {
        let adapter =
            FileConfigAdapter::from_string("[output]\na = true\nb = yes\nc = 1\nd = on\n")
                .unwrap();
        assert!(adapter.get_bool("output", "a", false));
        assert!(adapter.get_bool("output", "b", false));
        assert!(adapter.get_bool("output", "c", false));
        assert!(adapter.get_bool("output", "d", false));
    }

    #[test]
    fn get_bool_returns_false_values() {
        let adapter =
            FileConfigAdapter::from_string("[output]\na = false\nb = no\nc = 0\n").unwrap();
        assert!(!adapter.get_bool("output", "a", true));
        assert!(!adapter.get_bool("output", "b", true));
        assert!(!adapter.get_bool("output", "c", true));
    }

    #[test]
    fn get_bool_returns_default_for_missing_or_garbage() {
        let adapter = FileConfigAdapter::from_string("[output]\ncharts = maybe\n").unwrap();
        assert!(adapter.get_bool("output", "missing", true));
        assert!(!adapter.get_bool("output", "missing", false));
        assert!(adapter.get_bool("output", "charts", true));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[output]\ndir = /tmp/pangan-out\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("output", "dir"),
            Some("/tmp/pangan-out".to_string())
        );
    }

    #[test]
    fn from_file_reports_missing_file_as_config_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/path/pangan.ini").unwrap_err();
        assert!(matches!(err, PanganError::ConfigParse { .. }));
        assert!(err.to_string().contains("/nonexistent/path/pangan.ini"));
    }
}
