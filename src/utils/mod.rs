//! Digit string helpers

mod digits;
mod errors;
mod validation;

pub use digits::digits_to_rational;
pub use errors::UtilsError;
pub use validation::validate_digit_string;
