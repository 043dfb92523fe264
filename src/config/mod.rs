pub mod toml_config;

use crate::core::transform::CORE_FIELDS;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::{Local, NaiveDate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_COLUMNS: [&str; 12] = [
    "first_name",
    "last_name",
    "company",
    "birth_date",
    "salary",
    "address",
    "suburb",
    "state",
    "postcode",
    "phone",
    "mobile",
    "email",
];

/// Compact day-month-year first: that is what the member export uses.
pub const DEFAULT_DATE_FORMATS: [&str; 3] = ["%d%m%Y", "%d/%m/%Y", "%Y-%m-%d"];

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "member-etl")]
#[command(about = "Batch-load member records from a delimited export into MongoDB")]
pub struct CliConfig {
    /// TOML configuration file; when given it replaces the flags below
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, default_value = "data/member-data.csv")]
    pub input_path: String,

    #[arg(long, default_value_t = '|')]
    pub delimiter: char,

    /// Column names of the export, in file order
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_COLUMNS.iter().map(|s| s.to_string()))]
    pub columns: Vec<String>,

    /// Columns a row must supply to be accepted
    #[arg(long, value_delimiter = ',', default_values_t = CORE_FIELDS.iter().map(|s| s.to_string()))]
    pub required_fields: Vec<String>,

    /// Recognized birth date formats, tried in order
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_DATE_FORMATS.iter().map(|s| s.to_string()))]
    pub date_formats: Vec<String>,

    /// Date against which ages and date validity are computed
    #[arg(long, default_value_t = Local::now().date_naive())]
    pub reference_date: NaiveDate,

    #[arg(long, default_value = "mongodb://localhost:27017")]
    pub connection_uri: String,

    #[arg(long, default_value = "etl_database")]
    pub database: String,

    #[arg(long, default_value = "employees")]
    pub collection: String,

    /// Write accepted records to this newline-delimited JSON file instead
    /// of inserting into MongoDB
    #[arg(long)]
    pub json_output: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON (for scheduled runs)")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn delimiter(&self) -> u8 {
        self.delimiter as u8
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    fn date_formats(&self) -> &[String] {
        &self.date_formats
    }

    fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    fn connection_uri(&self) -> &str {
        &self.connection_uri
    }

    fn database(&self) -> &str {
        &self.database
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    fn json_output(&self) -> Option<&str> {
        self.json_output.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input_path", &self.input_path)?;
        validation::validate_delimiter("delimiter", self.delimiter)?;
        validation::validate_columns("columns", &self.columns)?;
        validation::validate_required_fields("required_fields", &self.required_fields, &self.columns)?;
        validation::validate_date_formats("date_formats", &self.date_formats)?;
        validation::validate_connection_uri("connection_uri", &self.connection_uri)?;
        validation::validate_non_empty_string("database", &self.database)?;
        validation::validate_non_empty_string("collection", &self.collection)?;
        Ok(())
    }
}
