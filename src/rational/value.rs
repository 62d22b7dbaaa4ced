use std::cmp::Ordering;

use crate::rational::errors::ArithmeticError;

/// Normalized fraction `n / d` with `d > 0` and `gcd(|n|, d) = 1`.
///
/// Zero is stored as `0 / 1`, so the derived equality and hash agree with
/// numeric equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    n: i64,
    d: i64,
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Rational {
    pub const ZERO: Rational = Rational { n: 0, d: 1 };
    pub const ONE: Rational = Rational { n: 1, d: 1 };
    pub const MINUS_ONE: Rational = Rational { n: -1, d: 1 };

    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] when `d == 0`, and
    /// [`ArithmeticError::Overflow`] when the normalized form does not fit
    /// (only possible for `i64::MIN` parts).
    pub fn new(n: i64, d: i64) -> Result<Self, ArithmeticError> {
        Self::from_wide(i128::from(n), i128::from(d))
    }

    pub const fn from_integer(n: i64) -> Self {
        Rational { n, d: 1 }
    }

    /// Caller guarantees `d > 0` and coprime parts.
    pub(crate) const fn from_parts_unchecked(n: i64, d: i64) -> Self {
        Rational { n, d }
    }

    /// Normalizes a fraction computed in 128-bit intermediates.
    pub(crate) fn from_wide(n: i128, d: i128) -> Result<Self, ArithmeticError> {
        if d == 0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        if n == 0 {
            return Ok(Self::ZERO);
        }
        let g = gcd(n.unsigned_abs(), d.unsigned_abs());
        // g divides both parts, so it fits back into i128
        let g = i128::try_from(g).map_err(|_| ArithmeticError::Overflow)?;
        let (mut n, mut d) = (n / g, d / g);
        if d < 0 {
            n = n.checked_neg().ok_or(ArithmeticError::Overflow)?;
            d = d.checked_neg().ok_or(ArithmeticError::Overflow)?;
        }
        let n = i64::try_from(n).map_err(|_| ArithmeticError::Overflow)?;
        let d = i64::try_from(d).map_err(|_| ArithmeticError::Overflow)?;
        Ok(Rational { n, d })
    }

    pub fn numer(&self) -> i64 {
        self.n
    }

    pub fn denom(&self) -> i64 {
        self.d
    }

    pub fn is_zero(&self) -> bool {
        self.n == 0
    }

    pub fn is_negative(&self) -> bool {
        self.n < 0
    }

    pub fn is_integer(&self) -> bool {
        self.d == 1
    }

    pub fn is_even(&self) -> bool {
        self.d == 1 && self.n % 2 == 0
    }

    pub fn is_one(&self) -> bool {
        *self == Self::ONE
    }

    pub fn is_minus_one(&self) -> bool {
        *self == Self::MINUS_ONE
    }

    /// `self < other`.
    pub fn less(&self, other: &Rational) -> bool {
        self < other
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational::from_integer(n)
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplying keeps the direction.
        let lhs = i128::from(self.n) * i128::from(other.d);
        let rhs = i128::from(other.n) * i128::from(self.d);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
