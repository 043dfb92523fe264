use crate::core::transform::CORE_FIELDS;
use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_connection_uri(field_name: &str, uri_str: &str) -> Result<()> {
    if uri_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: uri_str.to_string(),
            reason: "Connection URI cannot be empty".to_string(),
        });
    }

    match Url::parse(uri_str) {
        Ok(url) => match url.scheme() {
            "mongodb" | "mongodb+srv" => Ok(()),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: uri_str.to_string(),
                reason: format!("Unsupported connection scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: uri_str.to_string(),
            reason: format!("Invalid URI format: {}", e),
        }),
    }
}

pub fn validate_delimiter(field_name: &str, delimiter: char) -> Result<()> {
    if !delimiter.is_ascii() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: delimiter.to_string(),
            reason: "Delimiter must be a single ASCII character".to_string(),
        });
    }
    Ok(())
}

pub fn validate_columns(field_name: &str, columns: &[String]) -> Result<()> {
    if columns.is_empty() {
        return Err(EtlError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    let mut seen = HashSet::new();
    for column in columns {
        validate_non_empty_string(field_name, column)?;
        if !seen.insert(column.as_str()) {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: column.to_string(),
                reason: "Duplicate column name".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_required_fields(
    field_name: &str,
    required: &[String],
    columns: &[String],
) -> Result<()> {
    let known: HashSet<&str> = columns.iter().map(String::as_str).collect();
    for field in required {
        if !known.contains(field.as_str()) {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: field.to_string(),
                reason: "Required field is not a configured column".to_string(),
            });
        }
    }

    for core in CORE_FIELDS {
        if !required.iter().any(|field| field == core) {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: core.to_string(),
                reason: "Field must be required; the record cannot be built without it"
                    .to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_date_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(EtlError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for format in formats {
        validate_non_empty_string(field_name, format)?;
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
