//! Expiry month/year (MMAA) validation.

use crate::errors::ValidityError;
use chrono::{Datelike, NaiveDate};

/// Minimum months between now and the expiry month.
pub const MIN_MONTHS_AHEAD: i32 = 5;
/// Maximum months between now and the expiry month.
pub const MAX_MONTHS_AHEAD: i32 = 60;

/// Keep only the digit characters of the operator's input.
pub fn extract_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validate 4 digits `MMAA` against `today` and return the `MM/AA` form.
pub fn validate(raw_digits: &str, today: NaiveDate) -> Result<String, ValidityError> {
    if raw_digits.len() != 4 || !raw_digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidityError::WrongLength);
    }

    let (mm, yy) = raw_digits.split_at(2);
    let month: i32 = mm.parse().map_err(|_| ValidityError::WrongLength)?;
    let year_offset: i32 = yy.parse().map_err(|_| ValidityError::WrongLength)?;

    if !(1..=12).contains(&month) {
        return Err(ValidityError::InvalidMonth);
    }

    let target = (2000 + year_offset) * 12 + (month - 1);
    let current = today.year() * 12 + today.month0() as i32;
    let diff = target - current;

    if diff < MIN_MONTHS_AHEAD {
        return Err(ValidityError::TooSoon);
    }
    if diff > MAX_MONTHS_AHEAD {
        return Err(ValidityError::TooFar);
    }

    Ok(format!("{mm}/{yy}"))
}
