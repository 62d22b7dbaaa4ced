use log::trace;

use crate::expression::ast::{Node, Operator};
use crate::expression::errors::ExpressionError;
use crate::rational::Rational;

impl Operator {
    /// # Errors
    ///
    /// Returns the arithmetic failure of the operation, or
    /// [`ExpressionError::Arity`] if `self` is not a unary operator.
    pub fn apply_unary(self, value: Rational) -> Result<Rational, ExpressionError> {
        let result = match self {
            Operator::Fact => value.factorial(),
            Operator::Sqrt => value.sqrt(),
            Operator::Neg => value.checked_neg(),
            op => {
                return Err(ExpressionError::Arity {
                    op,
                    expected: op.arity(),
                    found: 1,
                });
            }
        };
        result.map_err(ExpressionError::from)
    }

    /// # Errors
    ///
    /// Returns the arithmetic failure of the operation, or
    /// [`ExpressionError::Arity`] if `self` is not a binary operator.
    pub fn apply_binary(self, left: Rational, right: Rational) -> Result<Rational, ExpressionError> {
        let result = match self {
            Operator::Add => left.checked_add(right),
            Operator::Sub => left.checked_sub(right),
            Operator::Mul => left.checked_mul(right),
            Operator::Div => left.checked_div(right),
            Operator::Pow => left.pow(right),
            op => {
                return Err(ExpressionError::Arity {
                    op,
                    expected: op.arity(),
                    found: 2,
                });
            }
        };
        result.map_err(ExpressionError::from)
    }
}

impl Node {
    /// # Errors
    ///
    /// Returns the first arithmetic failure met while evaluating bottom-up
    /// (division by zero, inexact power or root, undefined factorial,
    /// overflow), or [`ExpressionError::Arity`] for a node whose operator
    /// does not match its shape.
    pub fn eval(&self) -> Result<Rational, ExpressionError> {
        let result = match self {
            Node::Leaf(value) => Ok(*value),
            Node::Unary(op, child) => child.eval().and_then(|v| op.apply_unary(v)),
            Node::Binary(op, left, right) => {
                let l = left.eval()?;
                let r = right.eval()?;
                op.apply_binary(l, r)
            }
        };

        if let Err(e) = &result {
            trace!("Evaluation of {} failed: {}", self, e);
        }
        result
    }
}
