//! Arithmetic backends for the combinatorics in [`crate::statistics`].
//!
//! Every distribution function is written against the [`Arithmetic`] trait. Two
//! implementations exist:
//!
//! - [`Fixed`]: `u128` integers with wrapping multiplication and `f64` reals. Fast, but
//!   large binomial coefficients silently wrap around.
//! - [`Extended`]: unbounded [`BigUint`] integers and exact [`BigRational`] reals. Results
//!   are only narrowed to `f64` once the final ratio has been formed.
//!
//! The backend used by the crate-level functions is [`Active`], chosen by the `extended`
//! cargo feature. It never changes while a program runs.

use std::fmt::Debug;

use derive_more::Display;
use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticMode {
    Fixed,
    Extended,
}

pub trait Arithmetic {
    const MODE: ArithmeticMode;

    /// Largest `n` for which `n!` may be computed, if bounded.
    const FACTORIAL_LIMIT: Option<u64>;

    type Integer: Clone + Debug + std::fmt::Display + PartialEq;
    type Real: Clone + Debug + std::fmt::Display;

    fn integer(value: u64) -> Self::Integer;
    fn mul_integer(a: Self::Integer, b: &Self::Integer) -> Self::Integer;
    fn mul_small(a: Self::Integer, b: u64) -> Self::Integer;
    /// Integer division. Callers only divide when the quotient is exact.
    fn div_small(a: Self::Integer, b: u64) -> Self::Integer;

    /// Returns `None` for NaN and infinities.
    fn real(value: f64) -> Option<Self::Real>;
    fn real_from_integer(value: &Self::Integer) -> Self::Real;
    fn mul_real(a: Self::Real, b: &Self::Real) -> Self::Real;
    /// `b` must be non-zero.
    fn div_real(a: Self::Real, b: &Self::Real) -> Self::Real;
    fn div_real_small(a: Self::Real, b: u64) -> Self::Real;
    fn to_f64(value: &Self::Real) -> f64;

    /// `n!` as a real. No range check; see
    /// [`factorial_with`](crate::statistics::combinatorics::factorial_with).
    fn factorial(n: u64) -> Self::Real;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Fixed;

impl Arithmetic for Fixed {
    const MODE: ArithmeticMode = ArithmeticMode::Fixed;
    // 170! is the largest factorial below f64::MAX
    const FACTORIAL_LIMIT: Option<u64> = Some(170);

    type Integer = u128;
    type Real = f64;

    fn integer(value: u64) -> u128 {
        value as u128
    }

    fn mul_integer(a: u128, b: &u128) -> u128 {
        a.wrapping_mul(*b)
    }

    fn mul_small(a: u128, b: u64) -> u128 {
        a.wrapping_mul(b as u128)
    }

    fn div_small(a: u128, b: u64) -> u128 {
        a / b as u128
    }

    fn real(value: f64) -> Option<f64> {
        value.is_finite().then_some(value)
    }

    fn real_from_integer(value: &u128) -> f64 {
        *value as f64
    }

    fn mul_real(a: f64, b: &f64) -> f64 {
        a * b
    }

    fn div_real(a: f64, b: &f64) -> f64 {
        a / b
    }

    fn div_real_small(a: f64, b: u64) -> f64 {
        a / b as f64
    }

    fn to_f64(value: &f64) -> f64 {
        *value
    }

    // 35! already exceeds u128, so the product is accumulated in f64
    fn factorial(n: u64) -> f64 {
        (2..=n).fold(1.0, |acc, i| acc * i as f64)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Extended;

impl Arithmetic for Extended {
    const MODE: ArithmeticMode = ArithmeticMode::Extended;
    const FACTORIAL_LIMIT: Option<u64> = None;

    type Integer = BigUint;
    type Real = BigRational;

    fn integer(value: u64) -> BigUint {
        BigUint::from(value)
    }

    fn mul_integer(a: BigUint, b: &BigUint) -> BigUint {
        a * b
    }

    fn mul_small(a: BigUint, b: u64) -> BigUint {
        a * b
    }

    fn div_small(a: BigUint, b: u64) -> BigUint {
        a / b
    }

    fn real(value: f64) -> Option<BigRational> {
        BigRational::from_float(value)
    }

    fn real_from_integer(value: &BigUint) -> BigRational {
        BigRational::from_integer(BigInt::from(value.clone()))
    }

    fn mul_real(a: BigRational, b: &BigRational) -> BigRational {
        a * b
    }

    fn div_real(a: BigRational, b: &BigRational) -> BigRational {
        a / b
    }

    fn div_real_small(a: BigRational, b: u64) -> BigRational {
        a / BigInt::from(b)
    }

    fn to_f64(value: &BigRational) -> f64 {
        value.to_f64().unwrap_or(f64::NAN)
    }

    fn factorial(n: u64) -> BigRational {
        let product = (2..=n).fold(BigUint::from(1u32), |acc, i| acc * i);
        Self::real_from_integer(&product)
    }
}

#[cfg(not(feature = "extended"))]
pub type Active = Fixed;
#[cfg(feature = "extended")]
pub type Active = Extended;

pub const ACTIVE_MODE: ArithmeticMode = <Active as Arithmetic>::MODE;

/// `1` in the backend's real type.
pub(crate) fn real_one<B: Arithmetic>() -> B::Real {
    B::real_from_integer(&B::integer(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_wraps_instead_of_panicking() {
        let big = Fixed::integer(u64::MAX);
        let wrapped = Fixed::mul_integer(big, &Fixed::integer(u64::MAX));
        let wrapped = Fixed::mul_integer(wrapped, &Fixed::integer(u64::MAX));
        // (2^64 - 1)^3 mod 2^128
        assert_eq!(wrapped, 3 * (1u128 << 64) - 1);
    }

    #[test]
    fn test_real_rejects_non_finite() {
        assert!(Fixed::real(f64::NAN).is_none());
        assert!(Fixed::real(f64::INFINITY).is_none());
        assert!(Extended::real(f64::NAN).is_none());
        assert!(Extended::real(f64::NEG_INFINITY).is_none());
        assert_eq!(Fixed::real(0.25), Some(0.25));
    }

    #[test]
    fn test_extended_real_is_exact() {
        let third = Extended::div_real_small(real_one::<Extended>(), 3);
        let three = Extended::real_from_integer(&Extended::integer(3));
        let one = Extended::mul_real(third, &three);
        assert_eq!(one, real_one::<Extended>());
        assert_eq!(Extended::to_f64(&one), 1.0);
    }

    #[test]
    fn test_factorials() {
        assert_eq!(Fixed::factorial(0), 1.0);
        assert_eq!(Fixed::factorial(10), 3_628_800.0);
        let thirty = Extended::factorial(30);
        assert!(thirty.denom() == &BigInt::from(1));
        assert_eq!(thirty.to_integer().to_string(), "265252859812191058636308480000000");
    }

    #[test]
    fn test_extended_integer_does_not_overflow() {
        let big = Extended::mul_small(Extended::integer(u64::MAX), u64::MAX);
        let expected = BigUint::from(u64::MAX) * BigUint::from(u64::MAX);
        assert_eq!(big, expected);
        assert_eq!(Extended::div_small(big, u64::MAX), BigUint::from(u64::MAX));
    }

    #[test]
    fn test_active_mode_matches_feature() {
        if cfg!(feature = "extended") {
            assert_eq!(ACTIVE_MODE, ArithmeticMode::Extended);
        } else {
            assert_eq!(ACTIVE_MODE, ArithmeticMode::Fixed);
        }
    }
}
