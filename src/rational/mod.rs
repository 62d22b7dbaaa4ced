//! Exact rational arithmetic over 64-bit numerators and denominators.
//!
//! Every [`Rational`] is kept in normalized form: positive denominator and
//! coprime parts. Operations that can leave the representable range or the
//! rationals altogether return an [`ArithmeticError`] instead of rounding.

mod arith;
mod display;
mod errors;
mod tables;
mod value;

pub use errors::ArithmeticError;
pub use tables::MAX_FACTORIAL;
pub use value::Rational;
