use log::debug;

use crate::rational::errors::ArithmeticError;
use crate::rational::tables::{exact_root, factorial};
use crate::rational::value::Rational;

impl Rational {
    /// # Errors
    ///
    /// Returns [`ArithmeticError::Overflow`] if the sum does not fit.
    pub fn checked_add(self, other: Rational) -> Result<Rational, ArithmeticError> {
        let (n1, d1) = (i128::from(self.numer()), i128::from(self.denom()));
        let (n2, d2) = (i128::from(other.numer()), i128::from(other.denom()));
        let n = (n1 * d2)
            .checked_add(n2 * d1)
            .ok_or(ArithmeticError::Overflow)?;
        Rational::from_wide(n, d1 * d2)
    }

    /// # Errors
    ///
    /// Returns [`ArithmeticError::Overflow`] if the difference does not fit.
    pub fn checked_sub(self, other: Rational) -> Result<Rational, ArithmeticError> {
        let (n1, d1) = (i128::from(self.numer()), i128::from(self.denom()));
        let (n2, d2) = (i128::from(other.numer()), i128::from(other.denom()));
        let n = (n1 * d2)
            .checked_sub(n2 * d1)
            .ok_or(ArithmeticError::Overflow)?;
        Rational::from_wide(n, d1 * d2)
    }

    /// # Errors
    ///
    /// Returns [`ArithmeticError::Overflow`] if the product does not fit.
    pub fn checked_mul(self, other: Rational) -> Result<Rational, ArithmeticError> {
        let n = i128::from(self.numer()) * i128::from(other.numer());
        let d = i128::from(self.denom()) * i128::from(other.denom());
        Rational::from_wide(n, d)
    }

    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] when `other` is zero.
    pub fn checked_div(self, other: Rational) -> Result<Rational, ArithmeticError> {
        if other.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let n = i128::from(self.numer()) * i128::from(other.denom());
        let d = i128::from(self.denom()) * i128::from(other.numer());
        Rational::from_wide(n, d)
    }

    /// # Errors
    ///
    /// Returns [`ArithmeticError::Overflow`] for `i64::MIN` numerators.
    pub fn checked_neg(self) -> Result<Rational, ArithmeticError> {
        let n = self.numer().checked_neg().ok_or(ArithmeticError::Overflow)?;
        Ok(Rational::from_parts_unchecked(n, self.denom()))
    }

    fn recip(self) -> Result<Rational, ArithmeticError> {
        Rational::new(self.denom(), self.numer())
    }

    /// Exact `self ^ exponent`.
    ///
    /// A fractional exponent `p / q` raises both parts to `p` and then takes
    /// the exact integer `q`-th root of each. Anything that is not a rational
    /// number, or does not fit 64 bits, is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::UndefinedPower`] for `0 ^ e` with `e <= 0`,
    /// inexact roots, even roots of negatives and magnitude overflow.
    pub fn pow(self, exponent: Rational) -> Result<Rational, ArithmeticError> {
        let undefined = || ArithmeticError::UndefinedPower {
            base: self,
            exponent,
        };

        if exponent.is_negative() {
            if self.is_zero() {
                return Err(undefined());
            }
            let positive = exponent.checked_neg().map_err(|_| undefined())?;
            return self
                .recip()
                .and_then(|r| r.pow(positive))
                .map_err(|_| undefined());
        }
        if self.is_zero() && exponent.is_zero() {
            return Err(undefined());
        }

        // unit bases take any exponent, the rest need it to fit checked_pow
        let even = exponent.numer() % 2 == 0;
        let p = u32::try_from(exponent.numer()).ok();
        let raise = |x: i64| match (x, p) {
            (0 | 1, _) => Some(x),
            (-1, _) => Some(if even { 1 } else { -1 }),
            (_, Some(p)) => x.checked_pow(p),
            (_, None) => None,
        };
        let (Some(n1), Some(d1)) = (raise(self.numer()), raise(self.denom())) else {
            debug!("Power {} ^ {} overflows", self, exponent);
            return Err(undefined());
        };

        let q = exponent.denom();
        if q == 1 {
            return Rational::new(n1, d1).map_err(|_| undefined());
        }
        match (exact_root(n1, q), exact_root(d1, q)) {
            (Some(n2), Some(d2)) => Rational::new(n2, d2).map_err(|_| undefined()),
            _ => {
                debug!("No exact root[{}] of {}/{}", q, n1, d1);
                Err(undefined())
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`ArithmeticError::UndefinedPower`] when the square root is not rational.
    pub fn sqrt(self) -> Result<Rational, ArithmeticError> {
        self.pow(Rational::from_parts_unchecked(1, 2))
    }

    /// # Errors
    ///
    /// Returns [`ArithmeticError::UndefinedFactorial`] unless `self` is an
    /// integer in `0..=MAX_FACTORIAL`.
    pub fn factorial(self) -> Result<Rational, ArithmeticError> {
        if !self.is_integer() {
            return Err(ArithmeticError::UndefinedFactorial(self));
        }
        factorial(self.numer())
            .map(Rational::from_integer)
            .ok_or(ArithmeticError::UndefinedFactorial(self))
    }
}
