//! Prefix ("Polish") notation for single formulas.
//!
//! Operators precede their operands and tokens are separated by whitespace:
//! `* + 1/2 -- 3/4 - 5/6 7/8`. Unary minus is written `--` so that it cannot
//! be confused with subtraction; a leading `-` directly followed by a digit
//! belongs to a negative literal.

use std::sync::Arc;

use crate::expression::ast::{Node, Operator};
use crate::expression::errors::ExpressionError;
use crate::rational::Rational;

impl Node {
    pub fn to_prefix(&self) -> String {
        let mut out = String::new();
        write_prefix(self, &mut out);
        out
    }
}

fn write_prefix(node: &Node, out: &mut String) {
    match node {
        Node::Leaf(value) => out.push_str(&value.to_string()),
        Node::Unary(op, child) => {
            out.push_str(match op {
                Operator::Neg => "--",
                other => other.symbol(),
            });
            out.push(' ');
            write_prefix(child, out);
        }
        Node::Binary(op, left, right) => {
            out.push_str(op.symbol());
            out.push(' ');
            write_prefix(left, out);
            out.push(' ');
            write_prefix(right, out);
        }
    }
}

/// # Errors
///
/// Returns [`ExpressionError::Parse`] for unknown tokens, missing operands,
/// malformed rationals and trailing input after a complete formula.
pub fn parse_prefix(input: &str) -> Result<Arc<Node>, ExpressionError> {
    let fail = |reason: &str| ExpressionError::Parse {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let mut parser = Parser { rest: input };
    let node = parser.parse_node().map_err(|reason| fail(&reason))?;
    if !parser.rest.trim_start().is_empty() {
        return Err(fail(&format!("unexpected trailing input '{}'", parser.rest.trim())));
    }
    Ok(node)
}

struct Parser<'a> {
    rest: &'a str,
}

impl Parser<'_> {
    fn parse_node(&mut self) -> Result<Arc<Node>, String> {
        self.rest = self.rest.trim_start();
        if self.rest.is_empty() {
            return Err("operand missing".to_string());
        }
        if let Some(value) = self.take_rational()? {
            return Ok(Node::leaf(value));
        }

        let op = self.take_operator()?;
        let first = self.parse_node()?;
        let node = if op.arity() == 1 {
            Node::unary(op, first)
        } else {
            let second = self.parse_node()?;
            Node::binary(op, first, second)
        };
        node.map_err(|e| e.to_string())
    }

    /// Consumes `-?[0-9]+(/[0-9]+)?` if the input starts with it.
    fn take_rational(&mut self) -> Result<Option<Rational>, String> {
        let bytes = self.rest.as_bytes();
        let sign = usize::from(bytes.first() == Some(&b'-'));
        let digits = |from: usize| {
            bytes
                .get(from..)
                .map_or(0, |tail| tail.iter().take_while(|b| b.is_ascii_digit()).count())
        };

        let numerator = digits(sign);
        if numerator == 0 {
            return Ok(None);
        }
        let mut end = sign + numerator;
        if bytes.get(end) == Some(&b'/') {
            let denominator = digits(end + 1);
            if denominator > 0 {
                end += 1 + denominator;
            }
        }

        let (literal, rest) = self.rest.split_at(end);
        self.rest = rest;
        literal
            .parse::<Rational>()
            .map(Some)
            .map_err(|e| e.to_string())
    }

    fn take_operator(&mut self) -> Result<Operator, String> {
        let (op, len) = if self.rest.starts_with("sqrt") {
            (Operator::Sqrt, 4)
        } else if self.rest.starts_with("--") {
            (Operator::Neg, 2)
        } else {
            let op = match self.rest.as_bytes().first() {
                Some(b'+') => Operator::Add,
                Some(b'-') => Operator::Sub,
                Some(b'*') => Operator::Mul,
                Some(b'/') => Operator::Div,
                Some(b'^') => Operator::Pow,
                Some(b'!') => Operator::Fact,
                _ => {
                    let token = self.rest.split_whitespace().next().unwrap_or_default();
                    return Err(format!("unrecognized operator in '{}'", token));
                }
            };
            (op, 1)
        };
        self.rest = self.rest.get(len..).unwrap_or_default();
        Ok(op)
    }
}
