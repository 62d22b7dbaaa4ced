use std::sync::Arc;

use log::{debug, error};

use crate::expression::ast::{Node, Operator};

fn binary(op: Operator, left: &Arc<Node>, right: &Arc<Node>) -> Arc<Node> {
    Arc::new(Node::Binary(op, Arc::clone(left), Arc::clone(right)))
}

fn unary(op: Operator, child: Arc<Node>) -> Arc<Node> {
    Arc::new(Node::Unary(op, child))
}

/// Operand of a node rooted at `op`.
fn operand_of(node: &Node, op: Operator) -> Option<&Arc<Node>> {
    match node {
        Node::Unary(o, child) if *o == op => Some(child),
        _ => None,
    }
}

/// Rewrites the formula into its canonical form.
///
/// Rules are tried at the root first and the result is rewritten again until
/// nothing applies; only then are the operands canonicalized. Each root
/// rewrite must keep the evaluated value, otherwise the process aborts.
/// Unchanged sub-trees are returned as the same [`Arc`].
pub fn simplify(node: &Arc<Node>) -> Arc<Node> {
    let mut current = Arc::clone(node);
    loop {
        if let Some(next) = root_rewrites(&current)
            .into_iter()
            .find(|next| preserves_value(&current, next))
        {
            current = next;
            continue;
        }
        match simplify_operands(&current) {
            Some(rebuilt) => current = rebuilt,
            None => return current,
        }
    }
}

/// Candidate rewrites of the root, highest priority first.
fn root_rewrites(node: &Arc<Node>) -> Vec<Arc<Node>> {
    match node.as_ref() {
        // -(-a) => a
        Node::Unary(Operator::Neg, inner) => {
            operand_of(inner, Operator::Neg).cloned().into_iter().collect()
        }
        Node::Binary(Operator::Pow, left, exponent) => cancel_even_power(left, exponent)
            .into_iter()
            .collect(),
        Node::Binary(op, left, right) => migrate_sign(*op, left, right)
            .into_iter()
            .chain(reassociate(*op, left, right))
            .collect(),
        _ => Vec::new(),
    }
}

/// `(-a) ^ b => a ^ b` for an even integer `b`.
fn cancel_even_power(left: &Arc<Node>, exponent: &Arc<Node>) -> Option<Arc<Node>> {
    let base = operand_of(left, Operator::Neg)?;
    match exponent.eval() {
        Ok(e) if e.is_even() => Some(binary(Operator::Pow, base, exponent)),
        _ => None,
    }
}

/// Moves unary minus out of binary nodes and merges square roots.
fn migrate_sign(op: Operator, left: &Arc<Node>, right: &Arc<Node>) -> Option<Arc<Node>> {
    use Operator::{Add, Div, Mul, Neg, Sqrt, Sub};

    let neg_left = operand_of(left, Neg);
    let neg_right = operand_of(right, Neg);
    let rewritten = match (op, neg_left, neg_right) {
        (Add, _, Some(b)) => binary(Sub, left, b),
        (Sub, _, Some(b)) => binary(Add, left, b),
        (Sub, Some(a), None) => unary(Neg, binary(Add, a, right)),
        (Add, Some(a), None) => unary(Neg, binary(Sub, a, right)),
        (Mul | Div, Some(a), Some(b)) => binary(op, a, b),
        (Mul | Div, Some(a), None) => unary(Neg, binary(op, a, right)),
        (Mul | Div, None, Some(b)) => unary(Neg, binary(op, left, b)),
        (Mul | Div, None, None) => {
            let a = operand_of(left, Sqrt)?;
            let b = operand_of(right, Sqrt)?;
            unary(Sqrt, binary(op, a, b))
        }
        _ => return None,
    };
    Some(rewritten)
}

/// Left-associates chains: `a + (b + c)`, `a - (b - c)`, `a * (b * c)`, `a / (b / c)`.
fn reassociate(op: Operator, a: &Arc<Node>, right: &Arc<Node>) -> Option<Arc<Node>> {
    use Operator::{Add, Div, Mul, Sub};

    let Node::Binary(inner, b, c) = right.as_ref() else {
        return None;
    };
    // a - (b - c) = (a - b) + c and a / (b / c) = (a / b) * c
    let outer = match (op, *inner) {
        (Add, Add) => Add,
        (Sub, Sub) => Add,
        (Mul, Mul) => Mul,
        (Div, Div) => Mul,
        _ => return None,
    };
    Some(binary(outer, &binary(op, a, b), c))
}

fn simplify_operands(node: &Arc<Node>) -> Option<Arc<Node>> {
    match node.as_ref() {
        Node::Leaf(_) => None,
        Node::Unary(op, child) => {
            let c = simplify(child);
            (!Arc::ptr_eq(&c, child)).then(|| unary(*op, c))
        }
        Node::Binary(op, left, right) => {
            let l = simplify(left);
            let r = simplify(right);
            (!Arc::ptr_eq(&l, left) || !Arc::ptr_eq(&r, right)).then(|| binary(*op, &l, &r))
        }
    }
}

/// Checks a root rewrite against the value of the original formula.
///
/// A rewrite whose intermediate result no longer fits 64 bits is declined.
/// Any other difference means a rule is wrong, and the run is aborted.
fn preserves_value(before: &Node, after: &Node) -> bool {
    let Ok(expected) = before.eval() else {
        return true;
    };
    match after.eval() {
        Ok(actual) if actual == expected => true,
        Err(e) if e.is_overflow() => {
            debug!("Declining rewrite {} => {}: {}", before, after, e);
            false
        }
        actual => {
            let actual = actual.map_or_else(|e| e.to_string(), |v| v.to_string());
            error!(
                "Canonical form changed value: {} = {} became {} = {}",
                before, expected, after, actual
            );
            panic!(
                "canonicalization changed value\nbefore: {}\t[{}]\nafter:  {}\t[{}]",
                before, expected, after, actual
            );
        }
    }
}
