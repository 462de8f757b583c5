//! Extended nonnegative integers for language-cardinality arithmetic.
//!
//! Regular languages can be empty, finite, or infinite, and the finite ones
//! can be astronomically large: a character class repeated a handful of times
//! overflows a machine word without warning. `Size` is the value
//! `{0, 1, ...} ∪ {∞}` with total order (∞ is the maximum) and saturating
//! arithmetic, so cardinality computations are always exact and never wrap.
//!
//! # Representation
//!
//! Values that fit in a `u64` stay in a `u64`; arithmetic that overflows
//! promotes to a `BigUint`. The `Big` form is only ever used for values
//! strictly larger than `u64::MAX`, so derived structural equality is
//! canonical: there is exactly one representation per value.
//!
//! # Arithmetic
//!
//! Addition and multiplication saturate on ∞, with one exception:
//! `0 × ∞ = 0`. Multiplicative annihilation wins, which is the convention
//! that makes the product of an empty language with anything come out empty.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul};

use num_bigint::BigUint;

/// A nonnegative integer that may be infinite.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Size {
    /// A value that fits in a machine word.
    Small(u64),
    /// A finite value strictly larger than `u64::MAX`.
    Big(BigUint),
    /// The unique infinite value.
    Infinite,
}

impl Size {
    pub const ZERO: Size = Size::Small(0);
    pub const ONE: Size = Size::Small(1);
    pub const INFINITY: Size = Size::Infinite;

    /// True for `0`.
    #[inline]
    pub fn is_zero(&self) -> bool {
        matches!(self, Size::Small(0))
    }

    /// True for every value except ∞.
    #[inline]
    pub fn is_finite(&self) -> bool {
        !matches!(self, Size::Infinite)
    }

    /// Raise to the `k`-th power by repeated squaring.
    ///
    /// `pow(0)` is `1` for every base, including ∞.
    pub fn pow(&self, mut k: u32) -> Size {
        let mut base = self.clone();
        let mut acc = Size::ONE;
        while k > 0 {
            if k & 1 == 1 {
                acc = acc * base.clone();
            }
            k >>= 1;
            if k > 0 {
                base = base.clone() * base;
            }
        }
        acc
    }

    /// Human-oriented rendering.
    ///
    /// Finite values below 10⁶ print as plain decimal. Larger finite values
    /// print as a three-significant-digit mantissa times a power of ten,
    /// with the exact decimal in parentheses: `"1.23e8 (123456789)"`.
    /// ∞ prints as `"∞"`.
    pub fn approx_string(&self) -> String {
        match self {
            Size::Infinite => "∞".to_string(),
            Size::Small(n) if *n < 1_000_000 => n.to_string(),
            _ => {
                let digits = self.to_string();
                let exponent = digits.len() - 1;
                format!(
                    "{}.{}e{} ({})",
                    &digits[..1],
                    &digits[1..3],
                    exponent,
                    digits
                )
            }
        }
    }

    /// Canonicalize a `BigUint` into the `Small` form when it fits.
    fn from_big(b: BigUint) -> Size {
        match u64::try_from(&b) {
            Ok(n) => Size::Small(n),
            Err(_) => Size::Big(b),
        }
    }
}

impl From<u64> for Size {
    fn from(n: u64) -> Size {
        Size::Small(n)
    }
}

impl From<u32> for Size {
    fn from(n: u32) -> Size {
        Size::Small(n as u64)
    }
}

impl From<usize> for Size {
    fn from(n: usize) -> Size {
        Size::Small(n as u64)
    }
}

impl From<BigUint> for Size {
    fn from(b: BigUint) -> Size {
        Size::from_big(b)
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        match (self, rhs) {
            (Size::Infinite, _) | (_, Size::Infinite) => Size::Infinite,
            (Size::Small(a), Size::Small(b)) => match a.checked_add(b) {
                Some(n) => Size::Small(n),
                None => Size::Big(BigUint::from(a) + BigUint::from(b)),
            },
            // Adding a nonnegative value to something above u64::MAX keeps
            // it above u64::MAX, so no renormalization is needed.
            (Size::Small(a), Size::Big(b)) | (Size::Big(b), Size::Small(a)) => Size::Big(b + a),
            (Size::Big(a), Size::Big(b)) => Size::Big(a + b),
        }
    }
}

impl Mul for Size {
    type Output = Size;

    fn mul(self, rhs: Size) -> Size {
        // 0 × x = x × 0 = 0, even when x is ∞.
        if self.is_zero() || rhs.is_zero() {
            return Size::ZERO;
        }
        match (self, rhs) {
            (Size::Infinite, _) | (_, Size::Infinite) => Size::Infinite,
            (Size::Small(a), Size::Small(b)) => match a.checked_mul(b) {
                Some(n) => Size::Small(n),
                None => Size::Big(BigUint::from(a) * b),
            },
            // The Small factor is at least 1 here, so the product stays big.
            (Size::Small(a), Size::Big(b)) | (Size::Big(b), Size::Small(a)) => Size::Big(b * a),
            (Size::Big(a), Size::Big(b)) => Size::Big(a * b),
        }
    }
}

impl PartialOrd for Size {
    fn partial_cmp(&self, other: &Size) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Size {
    fn cmp(&self, other: &Size) -> Ordering {
        match (self, other) {
            (Size::Infinite, Size::Infinite) => Ordering::Equal,
            (Size::Infinite, _) => Ordering::Greater,
            (_, Size::Infinite) => Ordering::Less,
            (Size::Small(a), Size::Small(b)) => a.cmp(b),
            // Big is canonically above the u64 range.
            (Size::Small(_), Size::Big(_)) => Ordering::Less,
            (Size::Big(_), Size::Small(_)) => Ordering::Greater,
            (Size::Big(a), Size::Big(b)) => a.cmp(b),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Small(n) => write!(f, "{}", n),
            Size::Big(b) => write!(f, "{}", b),
            Size::Infinite => write!(f, "∞"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    fn sz(n: u64) -> Size {
        Size::from(n)
    }

    #[test]
    fn test_additive_identity() {
        for v in [Size::ZERO, sz(1), sz(12345), Size::INFINITY] {
            assert_eq!(v.clone() + Size::ZERO, v);
            assert_eq!(Size::ZERO + v.clone(), v);
        }
    }

    #[test]
    fn test_multiplicative_identity() {
        for v in [Size::ZERO, sz(1), sz(12345), Size::INFINITY] {
            assert_eq!(v.clone() * Size::ONE, v);
            assert_eq!(Size::ONE * v.clone(), v);
        }
    }

    #[test]
    fn test_zero_annihilates_infinity() {
        assert_eq!(Size::ZERO * Size::INFINITY, Size::ZERO);
        assert_eq!(Size::INFINITY * Size::ZERO, Size::ZERO);
    }

    #[test]
    fn test_infinity_absorbs_addition() {
        assert_eq!(Size::INFINITY + sz(42), Size::INFINITY);
        assert_eq!(sz(42) + Size::INFINITY, Size::INFINITY);
        assert_eq!(Size::INFINITY + Size::ZERO, Size::INFINITY);
    }

    #[test]
    fn test_overflow_promotes() {
        let huge = sz(u64::MAX) + sz(1);
        assert!(matches!(huge, Size::Big(_)), "u64::MAX + 1 must promote");
        assert!(huge > sz(u64::MAX));
        assert!(huge.is_finite());

        let product = sz(u64::MAX) * sz(2);
        assert!(matches!(product, Size::Big(_)));
        assert!(product > huge);
    }

    #[test]
    fn test_big_stays_canonical() {
        // A BigUint that fits in a u64 must collapse to the Small form so
        // structural equality keeps working.
        let b = Size::from(BigUint::from(7u32));
        assert_eq!(b, sz(7));
    }

    #[test]
    fn test_total_order() {
        let values = [
            Size::ZERO,
            sz(1),
            sz(1_000_000),
            sz(u64::MAX),
            sz(u64::MAX) + sz(1),
            Size::INFINITY,
        ];
        for (i, a) in values.iter().enumerate() {
            assert_eq!(a.cmp(a), Ordering::Equal, "reflexivity for {}", a);
            for b in &values[i + 1..] {
                assert!(a < b, "{} should order below {}", a, b);
                assert!(b > a, "antisymmetry for {} and {}", a, b);
            }
        }
    }

    #[test]
    fn test_pow_matches_repeated_multiplication() {
        for base in [Size::ZERO, sz(1), sz(3), sz(10), Size::INFINITY] {
            let mut expected = Size::ONE;
            for k in 0..=12u32 {
                assert_eq!(
                    base.pow(k),
                    expected,
                    "pow({}) disagrees with {}-fold product of {}",
                    k,
                    k,
                    base
                );
                expected = expected * base.clone();
            }
        }
    }

    #[test]
    fn test_pow_zero_is_one() {
        assert_eq!(Size::ZERO.pow(0), Size::ONE);
        assert_eq!(Size::INFINITY.pow(0), Size::ONE);
    }

    #[test]
    fn test_pow_promotes() {
        // 10^30 does not fit in a u64.
        let big = sz(10).pow(30);
        assert!(matches!(big, Size::Big(_)));
        assert_eq!(big.to_string(), format!("1{}", "0".repeat(30)));
    }

    #[test]
    fn test_approx_string_small() {
        assert_eq!(sz(0).approx_string(), "0");
        assert_eq!(sz(999_999).approx_string(), "999999");
    }

    #[test]
    fn test_approx_string_large() {
        assert_eq!(sz(1_000_000).approx_string(), "1.00e6 (1000000)");
        assert_eq!(sz(123_456_789).approx_string(), "1.23e8 (123456789)");
        let big = sz(10).pow(20);
        assert_eq!(
            big.approx_string(),
            format!("1.00e20 (1{})", "0".repeat(20))
        );
    }

    #[test]
    fn test_approx_string_infinite() {
        assert_eq!(Size::INFINITY.approx_string(), "∞");
        assert_eq!(Size::INFINITY.to_string(), "∞");
    }
}
