use crate::domain::model::FailureReason;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::borrow::Cow;
use std::str::FromStr;

/// Trims and collapses internal whitespace; fails on empty-after-trim.
pub fn required_text(raw: Option<&str>) -> Result<String, FailureReason> {
    let collapsed = collapse_whitespace(raw.unwrap_or(""));
    if collapsed.is_empty() {
        return Err(FailureReason::MissingField);
    }
    Ok(collapsed)
}

/// Like `required_text`, but an absent or blank value is just the empty
/// string.
pub fn optional_text(raw: Option<&str>) -> String {
    collapse_whitespace(raw.unwrap_or(""))
}

/// Tries each configured format in priority order; first parse wins.
///
/// Compact all-digit exports drop leading zeros, so a digit-only value of
/// 6 or 7 characters is left-padded to 8 before matching. A parsed date
/// after the reference date is out of range.
pub fn date(
    raw: Option<&str>,
    formats: &[String],
    reference_date: NaiveDate,
) -> Result<NaiveDate, FailureReason> {
    let value = raw.map(str::trim).unwrap_or("");
    if value.is_empty() {
        return Err(FailureReason::MissingField);
    }

    let all_digits = value.chars().all(|c| c.is_ascii_digit());
    let candidate: Cow<'_, str> = if all_digits && (6..=8).contains(&value.len()) {
        Cow::Owned(format!("{:0>8}", value))
    } else {
        Cow::Borrowed(value)
    };

    for format in formats {
        if let Ok(parsed) = NaiveDate::parse_from_str(&candidate, format) {
            if parsed > reference_date {
                return Err(FailureReason::OutOfRange);
            }
            return Ok(parsed);
        }
    }

    Err(FailureReason::UnparseableFormat)
}

/// Strips the currency symbol and thousands separators, then parses a
/// non-negative decimal with exactly two fractional digits.
pub fn salary(raw: Option<&str>) -> Result<Decimal, FailureReason> {
    let value = raw.map(str::trim).unwrap_or("");
    if value.is_empty() {
        return Err(FailureReason::MissingField);
    }

    let cleaned: String = value.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    let parsed =
        Decimal::from_str(cleaned.trim()).map_err(|_| FailureReason::UnparseableFormat)?;
    if parsed.is_sign_negative() {
        return Err(FailureReason::OutOfRange);
    }

    let mut amount = parsed.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(2);
    Ok(amount)
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
