use std::fmt;
use std::sync::Arc;

use crate::expression::errors::ExpressionError;
use crate::rational::Rational;

/// Operators a formula can be built from. `Identity` marks a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Identity,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Fact,
    Sqrt,
    Neg,
}

impl Operator {
    pub const BINARY: [Operator; 5] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Pow,
    ];

    pub fn arity(self) -> usize {
        match self {
            Operator::Identity => 0,
            Operator::Fact | Operator::Sqrt | Operator::Neg => 1,
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Pow => 2,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Identity => "",
            Operator::Add => "+",
            Operator::Sub | Operator::Neg => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "^",
            Operator::Fact => "!",
            Operator::Sqrt => "sqrt",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operator::Identity => write!(f, "identity"),
            Operator::Neg => write!(f, "unary -"),
            op => write!(f, "{}", op.symbol()),
        }
    }
}

/// Formula tree.
///
/// Nodes are never mutated after construction, so sub-trees are shared
/// between parents through [`Arc`]. The derived equality is structural:
/// `1 + 2` and `2 + 1` are different nodes even though they share a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Leaf(Rational),
    Unary(Operator, Arc<Node>),
    Binary(Operator, Arc<Node>, Arc<Node>),
}

impl Node {
    pub fn leaf(value: Rational) -> Arc<Node> {
        Arc::new(Node::Leaf(value))
    }

    /// # Errors
    ///
    /// Returns [`ExpressionError::Arity`] unless `op` is `Fact`, `Sqrt` or `Neg`.
    pub fn unary(op: Operator, child: Arc<Node>) -> Result<Arc<Node>, ExpressionError> {
        if op.arity() != 1 {
            return Err(ExpressionError::Arity {
                op,
                expected: op.arity(),
                found: 1,
            });
        }
        Ok(Arc::new(Node::Unary(op, child)))
    }

    /// # Errors
    ///
    /// Returns [`ExpressionError::Arity`] unless `op` is one of the binary operators.
    pub fn binary(
        op: Operator,
        left: Arc<Node>,
        right: Arc<Node>,
    ) -> Result<Arc<Node>, ExpressionError> {
        if op.arity() != 2 {
            return Err(ExpressionError::Arity {
                op,
                expected: op.arity(),
                found: 2,
            });
        }
        Ok(Arc::new(Node::Binary(op, left, right)))
    }

    pub fn op(&self) -> Operator {
        match self {
            Node::Leaf(_) => Operator::Identity,
            Node::Unary(op, _) | Node::Binary(op, _, _) => *op,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Node::Binary(..))
    }

    /// Distance from this node to its deepest leaf.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Unary(_, child) => 1 + child.depth(),
            Node::Binary(_, left, right) => 1 + left.depth().max(right.depth()),
        }
    }
}
