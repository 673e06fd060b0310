use crate::{
    arithmetic::{Active, Arithmetic},
    error::{DistributionError, Result},
};

/// Computes `C(n, k)` in backend `B`.
///
/// Multiplies and divides one term at a time. After step `i` the running value is the
/// product of `i` consecutive integers divided by `i!`, which is always an integer, so
/// every division is exact and intermediates stay close to the size of the result.
///
/// Returns zero when `k > n`. With [`Fixed`](crate::arithmetic::Fixed) the result wraps
/// silently once an intermediate exceeds `u128`.
pub fn binomial_coefficient_with<B: Arithmetic>(n: u64, k: u64) -> B::Integer {
    if k > n {
        return B::integer(0);
    }

    let terms = k.min(n - k);
    let mut result = B::integer(1);
    for i in 1..=terms {
        // n + 1 - i, written so that n == u64::MAX cannot overflow
        result = B::mul_small(result, n - (i - 1));
        result = B::div_small(result, i);
    }
    result
}

/// Like [`binomial_coefficient_with`], but `None` stands for "no sample size" and
/// yields zero.
pub fn binomial_coefficient_or_zero_with<B: Arithmetic>(n: Option<u64>, k: u64) -> B::Integer {
    match n {
        Some(n) => binomial_coefficient_with::<B>(n, k),
        None => B::integer(0),
    }
}

/// Computes `n!` in backend `B`.
///
/// The result is a backend real because 170! does not fit any fixed-width integer;
/// [`Extended`](crate::arithmetic::Extended) multiplies in [`BigUint`](num_bigint::BigUint)
/// and converts the exact product once. Backends with a
/// [`FACTORIAL_LIMIT`](Arithmetic::FACTORIAL_LIMIT) refuse larger `n` before doing any work.
pub fn factorial_with<B: Arithmetic>(n: u64) -> Result<B::Real> {
    if let Some(limit) = B::FACTORIAL_LIMIT {
        if n > limit {
            log::debug!("refusing {}! in {} mode (limit {})", n, B::MODE, limit);
            return Err(DistributionError::OverflowGuard { n, limit });
        }
    }

    Ok(B::factorial(n))
}

/// Number of ways to split `stars` identical individuals among `bins` types, i.e. the
/// number of distinct population states.
///
/// Fails when `stars + bins - 1` does not fit in `u64`.
pub fn stars_bars_with<B: Arithmetic>(stars: u64, bins: u64) -> Result<B::Integer> {
    if bins == 0 {
        return Ok(B::integer(u64::from(stars == 0)));
    }
    let n = stars.checked_add(bins - 1).ok_or_else(|| {
        DistributionError::invalid(format!("{stars} individuals in {bins} types overflow u64"))
    })?;
    Ok(binomial_coefficient_with::<B>(n, stars))
}

pub fn binomial_coefficient(n: u64, k: u64) -> <Active as Arithmetic>::Integer {
    binomial_coefficient_with::<Active>(n, k)
}

pub fn binomial_coefficient_or_zero(n: Option<u64>, k: u64) -> <Active as Arithmetic>::Integer {
    binomial_coefficient_or_zero_with::<Active>(n, k)
}

pub fn factorial(n: u64) -> Result<<Active as Arithmetic>::Real> {
    factorial_with::<Active>(n)
}

pub fn stars_bars(stars: u64, bins: u64) -> Result<<Active as Arithmetic>::Integer> {
    stars_bars_with::<Active>(stars, bins)
}
