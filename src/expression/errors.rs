use thiserror::Error;

use crate::expression::ast::Operator;
use crate::rational::ArithmeticError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Operator '{op}' takes {expected} operand(s), got {found}")]
    Arity {
        op: Operator,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
    #[error("Cannot parse '{input}': {reason}")]
    Parse { input: String, reason: String },
}

impl ExpressionError {
    pub fn is_overflow(&self) -> bool {
        matches!(self, ExpressionError::Arithmetic(e) if e.is_overflow())
    }
}
