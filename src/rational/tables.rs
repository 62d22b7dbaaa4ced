use log::debug;

/// Largest `n` with `n!` representable in an `i64`.
pub const MAX_FACTORIAL: i64 = 20;

/// Roots below this bound are answered from [`SQUARES`].
const SQUARE_TABLE_LEN: usize = 10_001;

const FACTORIALS: [i64; MAX_FACTORIAL as usize + 1] = {
    let mut table = [1i64; MAX_FACTORIAL as usize + 1];
    let mut i = 1;
    while i < table.len() {
        table[i] = table[i - 1] * i as i64;
        i += 1;
    }
    table
};

const SQUARES: [i64; SQUARE_TABLE_LEN] = {
    let mut table = [0i64; SQUARE_TABLE_LEN];
    let mut i = 0;
    while i < SQUARE_TABLE_LEN {
        table[i] = (i * i) as i64;
        i += 1;
    }
    table
};

/// `n!` for `0 <= n <= MAX_FACTORIAL`, `None` otherwise.
pub(crate) fn factorial(n: i64) -> Option<i64> {
    usize::try_from(n)
        .ok()
        .and_then(|i| FACTORIALS.get(i))
        .copied()
}

/// Exact integer square root, `None` for negative or non-square input.
pub(crate) fn exact_sqrt(n: i64) -> Option<i64> {
    if n < 0 {
        return None;
    }
    if let Some(&largest) = SQUARES.last()
        && n <= largest
    {
        return SQUARES.binary_search(&n).ok().map(|i| i as i64);
    }

    // Float estimate, then settle the last unit exactly.
    let estimate = (n as f64).sqrt() as i64;
    let found = (estimate.saturating_sub(1)..=estimate.saturating_add(1))
        .find(|&r| r.checked_mul(r) == Some(n));
    debug!("Large square root of {} resolved to {:?}", n, found);
    found
}

/// Exact integer `q`-th root. Negative input has a root only for odd `q`.
pub(crate) fn exact_root(a: i64, q: i64) -> Option<i64> {
    if q < 1 {
        return None;
    }
    if q == 1 || a == 0 || a == 1 {
        return Some(a);
    }
    if q == 2 {
        return exact_sqrt(a);
    }
    if a < 0 {
        if q % 2 == 0 {
            return None;
        }
        return exact_root(a.checked_neg()?, q).map(|r| -r);
    }

    // a >= 2 here, so any root above 63 would need 2^64 <= a
    let q = u32::try_from(q).ok().filter(|&q| q < 64)?;
    let estimate = (a as f64).powf(1.0 / f64::from(q)).round() as i64;
    (estimate.saturating_sub(1)..=estimate.saturating_add(1))
        .filter(|&r| r >= 2)
        .find(|&r| r.checked_pow(q) == Some(a))
}

#[cfg(test)]
mod tests {
    use super::{exact_root, exact_sqrt, factorial};

    #[test]
    fn test_factorial_table_edges() {
        assert_eq!(factorial(0), Some(1));
        assert_eq!(factorial(1), Some(1));
        assert_eq!(factorial(2), Some(2));
        assert_eq!(factorial(20), Some(2_432_902_008_176_640_000));
        assert_eq!(factorial(21), None);
        assert_eq!(factorial(-1), None);
    }

    #[test]
    fn test_exact_sqrt_table_and_fallback() {
        assert_eq!(exact_sqrt(0), Some(0));
        assert_eq!(exact_sqrt(49), Some(7));
        assert_eq!(exact_sqrt(50), None);
        assert_eq!(exact_sqrt(1_000_002_000_001), Some(1_000_001));
        assert_eq!(exact_sqrt(1_000_002_000_002), None);
        assert_eq!(exact_sqrt(-4), None);
    }

    #[test]
    fn test_exact_root_signs() {
        assert_eq!(exact_root(-8, 3), Some(-2));
        assert_eq!(exact_root(-8, 4), None);
        assert_eq!(exact_root(-1, 3), Some(-1));
        assert_eq!(exact_root(81, 4), Some(3));
        assert_eq!(exact_root(80, 4), None);
        assert_eq!(exact_root(1 << 62, 62), Some(2));
        assert_eq!(exact_root(7, 100), None);
    }
}
