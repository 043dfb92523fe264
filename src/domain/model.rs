use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// One row as read from the source, prior to any normalization.
///
/// `row_index` is the 0-based position of the row in the extracted
/// sequence; rejections refer back to it.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub row_index: usize,
    pub fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new(row_index: usize, fields: HashMap<String, String>) -> Self {
        Self { row_index, fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suburb: String,
    pub state: String,
    pub postcode: String,
}

/// Salary banding: A below 50k, B up to 100k inclusive, C above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalaryBucket {
    A,
    B,
    C,
}

/// The canonical member record produced by a successful transform.
///
/// Every field has passed its normalizer; derived fields (`full_name`,
/// `age`, `salary_bucket`) are computed from the canonical values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub company: String,
    pub birth_date: NaiveDate,
    pub age: i32,
    pub salary: Decimal,
    pub salary_bucket: SalaryBucket,
    pub address: Address,
    pub phone: String,
    pub mobile: String,
    pub email: String,
}

/// Row-local failure classes. These never abort a batch; they downgrade
/// one row from accepted to rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    #[error("required field is missing or empty")]
    MissingField,
    #[error("value does not match any recognized format")]
    UnparseableFormat,
    #[error("value is outside the allowed range")]
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldFailure {
    pub field: String,
    pub reason: FailureReason,
}

impl FieldFailure {
    pub fn new(field: impl Into<String>, reason: FailureReason) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// The structured outcome for a row that failed normalization. Lists
/// every failing field, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub row_index: usize,
    pub failures: Vec<FieldFailure>,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: ", self.row_index)?;
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

/// Per-run accounting. `accepted + rejected == rows_seen` always holds.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub rows_seen: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub rejections: Vec<Rejection>,
}

#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub accepted: Vec<NormalizedRecord>,
    pub summary: BatchSummary,
}
