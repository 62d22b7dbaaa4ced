use log::{debug, warn};

use crate::utils::errors::UtilsError;

/// Inputs longer than this take noticeably long to search.
const COMFORTABLE_DIGITS: usize = 9;

/// Checks that `digit_string` is a non-empty run of ASCII digits and returns its length.
///
/// # Errors
///
/// Returns an error if the string is empty or contains any non-ASCII-digit characters.
pub fn validate_digit_string(digit_string: &str) -> Result<usize, UtilsError> {
    debug!("Validating digit string: '{}'", digit_string);

    if digit_string.is_empty() {
        warn!("Digit string is empty");
        return Err(UtilsError::EmptyDigitString);
    }

    if !digit_string.bytes().all(|b| b.is_ascii_digit()) {
        warn!(
            "Digit string contains non-digit characters: '{}'",
            digit_string
        );
        return Err(UtilsError::InvalidDigitString(digit_string.to_string()));
    }

    let len = digit_string.len();
    if len > COMFORTABLE_DIGITS {
        warn!(
            "Searching {} digits; the search grows exponentially with length",
            len
        );
    }
    Ok(len)
}
