use crate::config::{DEFAULT_COLUMNS, DEFAULT_DATE_FORMATS};
use crate::core::transform::CORE_FIELDS;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub transform: TransformSection,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input_path: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformSection {
    /// Quoted ISO date, e.g. "2024-03-01"; omitted means today
    pub reference_date: Option<NaiveDate>,
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
    #[serde(default = "default_required_fields")]
    pub required_fields: Vec<String>,
}

impl Default for TransformSection {
    fn default() -> Self {
        Self {
            reference_date: None,
            date_formats: default_date_formats(),
            required_fields: default_required_fields(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    #[serde(default = "default_connection_uri")]
    pub connection_uri: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    pub json_output: Option<String>,
}

fn default_delimiter() -> char {
    '|'
}

fn default_columns() -> Vec<String> {
    DEFAULT_COLUMNS.iter().map(|s| s.to_string()).collect()
}

fn default_date_formats() -> Vec<String> {
    DEFAULT_DATE_FORMATS.iter().map(|s| s.to_string()).collect()
}

fn default_required_fields() -> Vec<String> {
    CORE_FIELDS.iter().map(|s| s.to_string()).collect()
}

fn default_connection_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "etl_database".to_string()
}

fn default_collection() -> String {
    "employees".to_string()
}

impl TomlConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    pub fn from_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.input_path
    }

    fn delimiter(&self) -> u8 {
        self.source.delimiter as u8
    }

    fn columns(&self) -> &[String] {
        &self.source.columns
    }

    fn required_fields(&self) -> &[String] {
        &self.transform.required_fields
    }

    fn date_formats(&self) -> &[String] {
        &self.transform.date_formats
    }

    fn reference_date(&self) -> NaiveDate {
        self.transform
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    fn connection_uri(&self) -> &str {
        &self.load.connection_uri
    }

    fn database(&self) -> &str {
        &self.load.database
    }

    fn collection(&self) -> &str {
        &self.load.collection
    }

    fn json_output(&self) -> Option<&str> {
        self.load.json_output.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("source.input_path", &self.source.input_path)?;
        validation::validate_delimiter("source.delimiter", self.source.delimiter)?;
        validation::validate_columns("source.columns", &self.source.columns)?;
        validation::validate_required_fields(
            "transform.required_fields",
            &self.transform.required_fields,
            &self.source.columns,
        )?;
        validation::validate_date_formats("transform.date_formats", &self.transform.date_formats)?;
        validation::validate_connection_uri("load.connection_uri", &self.load.connection_uri)?;
        validation::validate_non_empty_string("load.database", &self.load.database)?;
        validation::validate_non_empty_string("load.collection", &self.load.collection)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_fills_defaults() {
        let config = TomlConfig::from_str(
            r#"
[source]
input_path = "data/member-data.csv"

[load]
"#,
        )
        .unwrap();

        assert_eq!(config.delimiter(), b'|');
        assert_eq!(config.columns().len(), 12);
        assert_eq!(config.required_fields(), &default_required_fields()[..]);
        assert_eq!(config.database(), "etl_database");
        assert_eq!(config.collection(), "employees");
        assert!(config.json_output().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config_round_trip() {
        let config = TomlConfig::from_str(
            r#"
[source]
input_path = "export.txt"
delimiter = ";"
columns = ["first_name", "last_name", "birth_date", "salary"]

[transform]
reference_date = "2024-03-01"
date_formats = ["%Y-%m-%d"]
required_fields = ["first_name", "last_name", "birth_date", "salary"]

[load]
connection_uri = "mongodb://db.internal:27017"
database = "members"
collection = "current"
json_output = "out/accepted.ndjson"
"#,
        )
        .unwrap();

        assert_eq!(config.input_path(), "export.txt");
        assert_eq!(config.delimiter(), b';');
        assert_eq!(
            config.reference_date(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(config.date_formats(), ["%Y-%m-%d".to_string()]);
        assert_eq!(config.connection_uri(), "mongodb://db.internal:27017");
        assert_eq!(config.json_output(), Some("out/accepted.ndjson"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_source_table_is_an_error() {
        assert!(TomlConfig::from_str("[load]\n").is_err());
    }

    #[test]
    fn test_required_fields_must_cover_core_columns() {
        let config = TomlConfig::from_str(
            r#"
[source]
input_path = "export.txt"

[transform]
required_fields = ["first_name", "last_name"]

[load]
"#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }
}
