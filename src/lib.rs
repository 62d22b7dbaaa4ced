//! Digit formulas - A library for finding every value reachable from a digit string
//!
//! The digits are split into contiguous literals, in order, and combined with
//! `+ - * / ^`, factorial, square root and negation over exact rationals. Every
//! formula found is canonicalized and recorded under the value it produces.

pub mod expression;
pub mod rational;
pub mod report;
pub mod solver;
pub mod utils;

// Re-export the main public API
pub use expression::{ExpressionError, Node, Operator, RenderStyle, parse_prefix, simplify};
pub use rational::{ArithmeticError, Rational};
pub use report::{ReportOptions, render_report};
pub use solver::{
    ExpressionSolver, Registry, Retention, SearchResult, Solution, SolverConfig, SolverError, Span,
};
pub use utils::{UtilsError, validate_digit_string};

/// Find every value reachable from the given digits, with its formulas
///
/// This is a convenience function that creates a solver for `config` and runs
/// one search with a fresh registry.
///
/// # Arguments
///
/// * `digits` - A string containing only ASCII digits
/// * `config` - Retention settings for the registry
///
/// # Returns
///
/// * `Ok(SearchResult)` - Every solution over the whole string, sorted by value
/// * `Err(SolverError)` - If the input is not a digit string
///
/// # Errors
///
/// This function will return an error if:
/// * The input digit string is empty
/// * The input digit string contains non-digit characters
///
/// # Examples
///
/// ```
/// use digit_formulas::{Rational, Solution, SolverConfig, Span, search};
///
/// let result = search("12", &SolverConfig::default()).unwrap();
/// let whole = Span::new(0, 2).unwrap();
/// let three = Solution::new(Rational::from_integer(3), whole);
/// assert_eq!(result.formulas(&three)[0].to_string(), "1 + 2");
/// ```
pub fn search(digits: &str, config: &SolverConfig) -> Result<SearchResult, SolverError> {
    ExpressionSolver::with_config(config.clone()).search(digits)
}

/// Searches several digit strings in parallel; the results share nothing.
pub fn solve_batch(inputs: &[&str], config: &SolverConfig) -> Vec<Result<SearchResult, SolverError>> {
    ExpressionSolver::with_config(config.clone()).search_batch(inputs)
}
