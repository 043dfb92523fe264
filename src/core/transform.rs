use crate::core::normalize;
use crate::domain::model::{
    Address, FieldFailure, NormalizedRecord, RawRecord, Rejection, SalaryBucket,
};
use crate::domain::ports::ConfigProvider;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// Columns the typed record cannot be built without; the configured
/// required-field list must cover them.
pub const CORE_FIELDS: [&str; 4] = ["first_name", "last_name", "birth_date", "salary"];

/// Everything one run's transform depends on, passed in explicitly so
/// runs are reproducible.
#[derive(Debug, Clone)]
pub struct TransformConfig {
    pub reference_date: NaiveDate,
    pub date_formats: Vec<String>,
    pub required_fields: Vec<String>,
}

impl TransformConfig {
    pub fn from_provider(config: &impl ConfigProvider) -> Self {
        Self {
            reference_date: config.reference_date(),
            date_formats: config.date_formats().to_vec(),
            required_fields: config.required_fields().to_vec(),
        }
    }
}

pub struct RecordTransformer {
    config: TransformConfig,
}

impl RecordTransformer {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    /// Normalizes one raw row into a canonical record, or a rejection
    /// naming every failing field.
    ///
    /// Fields are normalized independently in schema order; failures
    /// accumulate rather than short-circuiting, so a rejection reports
    /// all of a row's problems at once. No partial record is ever built.
    pub fn transform(&self, raw: &RawRecord) -> Result<NormalizedRecord, Rejection> {
        let mut failures = Vec::new();

        let first_name = self.text_field(raw, "first_name", &mut failures);
        let last_name = self.text_field(raw, "last_name", &mut failures);
        let company = self.text_field(raw, "company", &mut failures);

        let birth_date = match normalize::date(
            raw.get("birth_date"),
            &self.config.date_formats,
            self.config.reference_date,
        ) {
            Ok(parsed) => Some(parsed),
            Err(reason) => {
                failures.push(FieldFailure::new("birth_date", reason));
                None
            }
        };

        let salary = match normalize::salary(raw.get("salary")) {
            Ok(amount) => Some(amount),
            Err(reason) => {
                failures.push(FieldFailure::new("salary", reason));
                None
            }
        };

        let street = self.text_field(raw, "address", &mut failures);
        let suburb = self.text_field(raw, "suburb", &mut failures);
        let state = self.text_field(raw, "state", &mut failures);
        let postcode = self.text_field(raw, "postcode", &mut failures);
        let phone = self.text_field(raw, "phone", &mut failures);
        let mobile = self.text_field(raw, "mobile", &mut failures);
        let email = self.text_field(raw, "email", &mut failures);

        match (birth_date, salary) {
            (Some(birth_date), Some(salary)) if failures.is_empty() => {
                let full_name = format!("{} {}", first_name, last_name);
                let age = age_in_years(birth_date, self.config.reference_date);
                let salary_bucket = salary_bucket(salary);
                Ok(NormalizedRecord {
                    first_name,
                    last_name,
                    full_name,
                    company,
                    birth_date,
                    age,
                    salary,
                    salary_bucket,
                    address: Address {
                        street,
                        suburb,
                        state,
                        postcode,
                    },
                    phone,
                    mobile,
                    email,
                })
            }
            _ => Err(Rejection {
                row_index: raw.row_index,
                failures,
            }),
        }
    }

    fn is_required(&self, name: &str) -> bool {
        self.config.required_fields.iter().any(|field| field == name)
    }

    fn text_field(
        &self,
        raw: &RawRecord,
        name: &'static str,
        failures: &mut Vec<FieldFailure>,
    ) -> String {
        if self.is_required(name) {
            match normalize::required_text(raw.get(name)) {
                Ok(value) => value,
                Err(reason) => {
                    failures.push(FieldFailure::new(name, reason));
                    String::new()
                }
            }
        } else {
            normalize::optional_text(raw.get(name))
        }
    }
}

/// Whole years between birth and reference, decremented when the
/// reference month/day precede the birthday within the year.
pub fn age_in_years(birth_date: NaiveDate, reference_date: NaiveDate) -> i32 {
    let mut age = reference_date.year() - birth_date.year();
    if (reference_date.month(), reference_date.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

pub fn salary_bucket(salary: Decimal) -> SalaryBucket {
    if salary < Decimal::from(50_000) {
        SalaryBucket::A
    } else if salary <= Decimal::from(100_000) {
        SalaryBucket::B
    } else {
        SalaryBucket::C
    }
}
