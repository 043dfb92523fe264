use crate::domain::model::RawRecord;
use crate::domain::ports::{ConfigProvider, Source};
use crate::utils::error::Result;
use async_trait::async_trait;
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;

/// Reads the delimited member export and pairs each line with the
/// configured column names. Lines with the wrong field count never make
/// it into the row sequence.
pub struct FileSource<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> FileSource<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }
}

#[async_trait]
impl<C: ConfigProvider> Source for FileSource<C> {
    async fn extract(&self) -> Result<Vec<RawRecord>> {
        let columns = self.config.columns();
        let file = File::open(self.config.input_path())?;
        let mut reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter())
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            if record.len() != columns.len() {
                tracing::warn!(
                    "Skipping line with {} fields (expected {}): {:?}",
                    record.len(),
                    columns.len(),
                    record
                );
                continue;
            }

            let fields: HashMap<String, String> = columns
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect();
            rows.push(RawRecord::new(rows.len(), fields));
        }

        tracing::info!(
            "Extracted {} rows from {}",
            rows.len(),
            self.config.input_path()
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_for(path: &str) -> CliConfig {
        CliConfig {
            config: None,
            input_path: path.to_string(),
            delimiter: '|',
            columns: crate::config::DEFAULT_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            required_fields: crate::core::transform::CORE_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            date_formats: crate::config::DEFAULT_DATE_FORMATS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            reference_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            connection_uri: "mongodb://localhost:27017".to_string(),
            database: "etl_database".to_string(),
            collection: "employees".to_string(),
            json_output: None,
            verbose: false,
            log_json: false,
        }
    }

    #[tokio::test]
    async fn test_extract_maps_columns_in_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "John|Doe|Acme|15011980|75000|1 Main St|Anytown|NSW|2000|02|04|j@example.com"
        )
        .unwrap();

        let source = FileSource::new(config_for(file.path().to_str().unwrap()));
        let rows = source.extract().await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row_index, 0);
        assert_eq!(rows[0].get("first_name"), Some("John"));
        assert_eq!(rows[0].get("birth_date"), Some("15011980"));
        assert_eq!(rows[0].get("email"), Some("j@example.com"));
    }

    #[tokio::test]
    async fn test_extract_skips_wrong_arity_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "John|Doe|Acme|15011980|75000|1 Main St|Anytown|NSW|2000|02|04|j@example.com"
        )
        .unwrap();
        writeln!(file, "broken|line").unwrap();
        writeln!(
            file,
            "Jane|Roe|Initech|05071992|80000|2 High St|Springfield|VIC|3000|03|04|jane@example.com"
        )
        .unwrap();

        let source = FileSource::new(config_for(file.path().to_str().unwrap()));
        let rows = source.extract().await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("first_name"), Some("John"));
        assert_eq!(rows[1].get("first_name"), Some("Jane"));
        assert_eq!(rows[1].row_index, 1);
    }

    #[tokio::test]
    async fn test_extract_unquotes_fields() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "John|Doe|\"Acme Pty Ltd\"|15011980|75000|1 Main St|Anytown|NSW|2000|02|04|j@example.com"
        )
        .unwrap();

        let source = FileSource::new(config_for(file.path().to_str().unwrap()));
        let rows = source.extract().await.unwrap();

        assert_eq!(rows[0].get("company"), Some("Acme Pty Ltd"));
    }

    #[tokio::test]
    async fn test_extract_missing_file_is_fatal() {
        let source = FileSource::new(config_for("does/not/exist.csv"));
        assert!(source.extract().await.is_err());
    }
}
