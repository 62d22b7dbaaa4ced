use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::expression::{Node, Operator};
use crate::rational::Rational;
use crate::solver::config::SolverConfig;
use crate::solver::errors::SolverError;
use crate::solver::registry::Registry;
use crate::solver::solution::{Solution, Span};
use crate::utils::{digits_to_rational, validate_digit_string};

/// Memoized solutions per digit range
type SpanCache = HashMap<Span, Vec<Solution>>;

/// Drops repeated solutions, keeping first occurrences in order.
fn uniq(solutions: Vec<Solution>) -> Vec<Solution> {
    let mut seen = HashSet::with_capacity(solutions.len());
    solutions.into_iter().filter(|s| seen.insert(*s)).collect()
}

/// True when `op` is defined for `value` and actually changes it.
fn advances(op: Operator, value: Rational) -> bool {
    op.apply_unary(value).is_ok_and(|v| v != value)
}

/// One search over one digit string.
///
/// Holds the registry of formulas found so far; independent searches never
/// share state.
pub struct SolutionSearch<'a> {
    digits: &'a str,
    registry: Registry,
    cache: SpanCache,
    reversed: bool,
}

impl<'a> SolutionSearch<'a> {
    pub fn new(digits: &'a str, config: &SolverConfig) -> Self {
        Self {
            digits,
            registry: Registry::new(config.retention()),
            cache: SpanCache::new(),
            reversed: false,
        }
    }

    /// Enumerates split points back to front. The keys found do not depend
    /// on the order.
    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn into_registry(self) -> Registry {
        self.registry
    }

    /// The digits of `span` read as one literal, recorded as its own formula.
    pub fn leaf(&mut self, span: Span) -> Option<Solution> {
        match digits_to_rational(self.digits, span.start(), span.end()) {
            Ok(value) => {
                let solution = Solution::new(value, span);
                self.registry.seed(solution);
                Some(solution)
            }
            Err(e) => {
                warn!("Skipping literal at {}: {}", span, e);
                None
            }
        }
    }

    /// Applies a unary operator to every known formula of `s`.
    ///
    /// Returns `None` when the operator is undefined for the value.
    pub fn unary(&mut self, op: Operator, s: Solution) -> Option<Solution> {
        let value = match op.apply_unary(s.value) {
            Ok(value) => value,
            Err(e) => {
                debug!("{} {} is unreachable: {}", op, s, e);
                return None;
            }
        };
        let result = Solution::new(value, s.span);

        let formulas = self.registry.formulas(&s).to_vec();
        for formula in formulas {
            if op == Operator::Neg && formula.op() == Operator::Neg {
                continue;
            }
            self.registry
                .insert(result, Arc::new(Node::Unary(op, formula)));
        }
        Some(result)
    }

    /// Combines two adjacent solutions with a binary operator.
    ///
    /// Returns `None` when `s2` does not start where `s1` ends, or when the
    /// operator is undefined for the two values.
    pub fn binary(&mut self, op: Operator, s1: Solution, s2: Solution) -> Option<Solution> {
        let span = s1.span.join(&s2.span)?;
        let value = match op.apply_binary(s1.value, s2.value) {
            Ok(value) => value,
            Err(e) => {
                debug!("{} {} {} is unreachable: {}", s1, op, s2, e);
                return None;
            }
        };
        let result = Solution::new(value, span);

        let lefts = self.registry.formulas(&s1).to_vec();
        let rights = self.registry.formulas(&s2).to_vec();
        for left in &lefts {
            for right in &rights {
                if op == Operator::Sub && right.op() == Operator::Neg {
                    continue;
                }
                self.registry.insert(
                    result,
                    Arc::new(Node::Binary(op, Arc::clone(left), Arc::clone(right))),
                );
            }
        }
        Some(result)
    }

    /// `s` itself plus everything reachable from it by unary operators.
    pub fn all_unary(&mut self, s: Solution) -> Vec<Solution> {
        if s.value.is_zero() {
            return vec![s];
        }

        let mut result = vec![s];
        let negated = self.unary(Operator::Neg, s);
        result.extend(negated);
        if s.value.is_one() || s.value.is_minus_one() {
            return uniq(result);
        }

        // factorial and square root only start from a non-negative value
        let base = if s.value.is_negative() {
            match negated {
                Some(n) => n,
                None => return uniq(result),
            }
        } else {
            s
        };

        let mut current = base;
        while advances(Operator::Fact, current.value) {
            let Some(f) = self.unary(Operator::Fact, current) else {
                break;
            };
            result.push(f);
            result.extend(self.unary(Operator::Neg, f));
            current = f;
        }

        let mut current = base;
        while advances(Operator::Sqrt, current.value) {
            let Some(root) = self.unary(Operator::Sqrt, current) else {
                break;
            };
            result.push(root);
            if advances(Operator::Fact, root.value) {
                result.extend(self.unary(Operator::Fact, root));
            }
            current = root;
        }

        uniq(result)
    }

    /// Every binary combination of the unary closures of `s1` and `s2`.
    pub fn all_binary(&mut self, s1: Solution, s2: Solution) -> Vec<Solution> {
        let lefts = self.all_unary(s1);
        let rights = self.all_unary(s2);

        let mut result = Vec::new();
        for op in Operator::BINARY {
            for &left in &lefts {
                for &right in &rights {
                    result.extend(self.binary(op, left, right));
                }
            }
        }
        uniq(result)
    }

    /// All solutions that use exactly the digits of `span`.
    pub fn find_all_solutions(&mut self, span: Span) -> Vec<Solution> {
        if let Some(cached) = self.cache.get(&span) {
            return cached.clone();
        }

        let mut found = Vec::new();
        if let Some(literal) = self.leaf(span) {
            found.extend(self.all_unary(literal));
        }

        let mut splits: Vec<_> = span.splits().collect();
        if self.reversed {
            splits.reverse();
        }
        for (left_span, right_span) in splits {
            let lefts = self.find_all_solutions(left_span);
            let rights = self.find_all_solutions(right_span);
            for &left in &lefts {
                for &right in &rights {
                    found.extend(self.all_binary(left, right));
                }
            }
        }

        let found = uniq(found);
        debug!("{} solutions for span {}", found.len(), span);
        self.cache.insert(span, found.clone());
        found
    }
}

/// Outcome of searching one digit string
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub digits: String,
    /// Every solution covering the whole string, sorted by value.
    pub solutions: Vec<Solution>,
    pub registry: Registry,
}

impl SearchResult {
    pub fn formulas(&self, solution: &Solution) -> &[Arc<Node>] {
        self.registry.formulas(solution)
    }
}

/// Main solver for finding every formula over a digit string
pub struct ExpressionSolver {
    config: SolverConfig,
}

impl ExpressionSolver {
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// # Errors
    ///
    /// Returns an error if `digits` is empty or contains anything but ASCII digits.
    pub fn search(&self, digits: &str) -> Result<SearchResult, SolverError> {
        self.search_in_order(digits, false)
    }

    /// Same as [`ExpressionSolver::search`], with split points enumerated
    /// back to front when `reversed` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if `digits` is empty or contains anything but ASCII digits.
    pub fn search_in_order(
        &self,
        digits: &str,
        reversed: bool,
    ) -> Result<SearchResult, SolverError> {
        let len = validate_digit_string(digits)?;
        info!(
            "Searching formulas for '{}' with {:?}",
            digits,
            self.config.retention()
        );

        let mut search = SolutionSearch::new(digits, &self.config);
        if reversed {
            search = search.reversed();
        }
        let mut solutions = Vec::new();
        if let Some(whole) = Span::new(0, len) {
            for s in search.find_all_solutions(whole) {
                solutions.extend(search.all_unary(s));
            }
        }
        let mut solutions = uniq(solutions);
        solutions.sort_by_key(|s| s.value);

        let registry = search.into_registry();
        info!(
            "Found {} values for '{}' ({} keys in registry)",
            solutions.len(),
            digits,
            registry.len()
        );
        Ok(SearchResult {
            digits: digits.to_string(),
            solutions,
            registry,
        })
    }

    /// Searches several digit strings in parallel, one registry each.
    pub fn search_batch(&self, inputs: &[&str]) -> Vec<Result<SearchResult, SolverError>> {
        inputs.par_iter().map(|digits| self.search(digits)).collect()
    }
}

impl Default for ExpressionSolver {
    fn default() -> Self {
        Self::new()
    }
}
