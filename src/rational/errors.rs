use thiserror::Error;

use crate::rational::Rational;

/// Failures of exact rational arithmetic
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArithmeticError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Cannot calculate {base} ^ ({exponent}) exactly")]
    UndefinedPower { base: Rational, exponent: Rational },
    #[error("Cannot calculate {0}!")]
    UndefinedFactorial(Rational),
    #[error("Result does not fit into 64-bit rational")]
    Overflow,
    #[error("Cannot read rational from '{0}'")]
    Parse(String),
}

impl ArithmeticError {
    /// True when the failure comes from the width of the representation,
    /// not from the operation being undefined for its operands.
    pub fn is_overflow(&self) -> bool {
        matches!(self, ArithmeticError::Overflow)
    }
}
