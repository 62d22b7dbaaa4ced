use log::{debug, warn};

use crate::rational::Rational;
use crate::utils::errors::UtilsError;

/// Reads `digits[start..end]` as one decimal literal.
///
/// Leading zeros are accepted, so `"007"` reads as 7.
///
/// # Errors
///
/// Returns an error if the provided indices are out of bounds or invalid,
/// if the slice contains anything but ASCII digits, or if the literal does
/// not fit into an `i64`.
pub fn digits_to_rational(digits: &str, start: usize, end: usize) -> Result<Rational, UtilsError> {
    debug!("Converting digits[{}..{}] from '{}'", start, end, digits);

    if start >= digits.len() || end > digits.len() || start >= end {
        warn!(
            "Invalid range: start={}, end={}, length={}",
            start,
            end,
            digits.len()
        );
        return Err(UtilsError::InvalidRange {
            start,
            end,
            length: digits.len(),
        });
    }

    let slice = digits.get(start..end).ok_or(UtilsError::InvalidRange {
        start,
        end,
        length: digits.len(),
    })?;

    if !slice.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UtilsError::InvalidDigitString(slice.to_string()));
    }

    let value = slice
        .parse::<i64>()
        .map_err(|_| UtilsError::LiteralTooLarge(slice.to_string()))?;
    debug!("Converted '{}' to {}", slice, value);
    Ok(Rational::from_integer(value))
}
