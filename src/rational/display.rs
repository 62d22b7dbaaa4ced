use std::fmt;
use std::str::FromStr;

use crate::rational::errors::ArithmeticError;
use crate::rational::value::Rational;

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}

impl FromStr for Rational {
    type Err = ArithmeticError;

    /// Reads `a` or `a/b`; both parts may carry a sign and the result is normalized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_part = |part: &str| {
            part.trim()
                .parse::<i64>()
                .map_err(|_| ArithmeticError::Parse(s.to_string()))
        };

        match s.split_once('/') {
            None => parse_part(s).map(Rational::from_integer),
            Some((n, d)) => {
                let n = parse_part(n)?;
                let d = parse_part(d)?;
                if d == 0 {
                    return Err(ArithmeticError::Parse(s.to_string()));
                }
                Rational::new(n, d)
            }
        }
    }
}
