use std::fmt;

use crate::expression::ast::{Node, Operator};

/// How much parenthesization [`Node::render`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Only the parentheses needed to read the formula back unambiguously.
    #[default]
    Compact,
    /// Every non-leaf operand is parenthesized.
    FullParens,
}

/// Display adapter returned by [`Node::render`].
pub struct Rendered<'a> {
    node: &'a Node,
    style: RenderStyle,
}

impl Node {
    pub fn render(&self, style: RenderStyle) -> Rendered<'_> {
        Rendered { node: self, style }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_node(f, self, RenderStyle::Compact)
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_node(f, self.node, self.style)
    }
}

fn write_child(
    f: &mut fmt::Formatter,
    child: &Node,
    need_parens: bool,
    style: RenderStyle,
) -> fmt::Result {
    let forced = style == RenderStyle::FullParens && !matches!(child, Node::Leaf(_));
    if need_parens || forced {
        write!(f, "(")?;
        write_node(f, child, style)?;
        write!(f, ")")
    } else {
        write_node(f, child, style)
    }
}

fn write_node(f: &mut fmt::Formatter, node: &Node, style: RenderStyle) -> fmt::Result {
    match node {
        Node::Leaf(value) => write!(f, "{}", value),
        Node::Binary(op, left, right) => {
            let need_left = match op {
                Operator::Mul | Operator::Div => left.is_binary(),
                Operator::Pow => left.is_binary() || left.op() == Operator::Neg,
                _ => false,
            };
            write_child(f, left, need_left, style)?;
            write!(f, " {} ", op.symbol())?;
            write_child(f, right, right.is_binary(), style)
        }
        Node::Unary(Operator::Sqrt, child) => {
            // sqrt(...) already brackets its operand
            write!(f, "sqrt(")?;
            write_node(f, child, style)?;
            write!(f, ")")
        }
        Node::Unary(Operator::Fact, child) => {
            let need = child.is_binary() || child.op() == Operator::Neg;
            write_child(f, child, need, style)?;
            write!(f, "!")
        }
        Node::Unary(Operator::Neg, child) => {
            write!(f, "-")?;
            let need = child.is_binary() || child.op() == Operator::Fact;
            write_child(f, child, need, style)
        }
        Node::Unary(op, child) => {
            write!(f, "<{}>", op)?;
            write_child(f, child, true, style)
        }
    }
}
