//! Immutable formula trees, their evaluation, rendering and canonical form

mod ast;
mod display;
mod errors;
mod eval;
mod prefix;
mod simplify;

pub use ast::{Node, Operator};
pub use display::{RenderStyle, Rendered};
pub use errors::ExpressionError;
pub use prefix::parse_prefix;
pub use simplify::simplify;
