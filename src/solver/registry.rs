use std::collections::HashMap;
use std::sync::Arc;

use log::trace;

use crate::expression::{Node, simplify};
use crate::solver::config::Retention;
use crate::solver::solution::Solution;

/// Formulas found so far, keyed by (value, span).
///
/// Owned by a single search; formulas within a key are distinct by
/// structure, never by value.
#[derive(Debug, Clone)]
pub struct Registry {
    retention: Retention,
    formulas: HashMap<Solution, Vec<Arc<Node>>>,
}

impl Registry {
    pub fn new(retention: Retention) -> Self {
        Self {
            retention,
            formulas: HashMap::new(),
        }
    }

    pub fn retention(&self) -> Retention {
        self.retention
    }

    fn has_formula(&self, key: &Solution) -> bool {
        self.formulas.get(key).is_some_and(|f| !f.is_empty())
    }

    /// Stores a literal exactly as given.
    pub(crate) fn seed(&mut self, key: Solution) {
        if !self.has_formula(&key) {
            self.formulas
                .entry(key)
                .or_default()
                .push(Node::leaf(key.value));
        }
    }

    /// Canonicalizes `formula` and stores it under `key` if the retention
    /// policy allows it and no structurally equal formula is stored yet.
    /// Returns whether the formula was added.
    pub fn insert(&mut self, key: Solution, formula: Arc<Node>) -> bool {
        let occupied = self.has_formula(&key);
        if occupied && self.retention == Retention::FirstOnly {
            return false;
        }

        let formula = simplify(&formula);
        if let Retention::DepthBounded(max_depth) = self.retention
            && occupied
            && formula.depth() > max_depth
        {
            return false;
        }

        let stored = self.formulas.entry(key).or_default();
        if stored.iter().any(|f| **f == *formula) {
            return false;
        }
        trace!("{} = {}", key, formula);
        stored.push(formula);
        true
    }

    pub fn formulas(&self, key: &Solution) -> &[Arc<Node>] {
        self.formulas.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, key: &Solution) -> bool {
        self.has_formula(key)
    }

    /// Number of keys holding at least one formula.
    pub fn len(&self) -> usize {
        self.formulas.values().filter(|f| !f.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Solution, &[Arc<Node>])> {
        self.formulas
            .iter()
            .filter(|(_, f)| !f.is_empty())
            .map(|(key, f)| (key, f.as_slice()))
    }
}
