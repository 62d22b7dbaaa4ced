//! Exhaustive search for formulas over a digit string

mod config;
mod core;
mod errors;
mod registry;
mod solution;

pub use config::{Retention, SolverConfig};
pub use core::{ExpressionSolver, SearchResult, SolutionSearch};
pub use errors::SolverError;
pub use registry::Registry;
pub use solution::{Solution, Span};

#[cfg(test)]
mod tests;
