use crate::{
    arithmetic::{Active, Arithmetic, real_one},
    error::{DistributionError, Result},
    statistics::combinatorics::{binomial_coefficient_with, factorial_with},
};

fn validate_composition(m: u64, k: usize, n: u64, sample: &[u64], population: &[u64]) -> Result<()> {
    if sample.len() != k || population.len() != k {
        return Err(DistributionError::invalid(format!(
            "sample ({}) and population ({}) counts must both have length k = {}",
            sample.len(),
            population.len(),
            k
        )));
    }
    if let Some(i) = (0..k).find(|&i| sample[i] > population[i]) {
        return Err(DistributionError::invalid(format!(
            "sample count {} of type {} exceeds its population count {}",
            sample[i], i, population[i]
        )));
    }
    let sample_size: u128 = sample.iter().map(|&c| c as u128).sum();
    if sample_size != n as u128 {
        return Err(DistributionError::invalid(format!(
            "sample counts sum to {sample_size}, expected n = {n}"
        )));
    }
    let population_size: u128 = population.iter().map(|&c| c as u128).sum();
    if population_size != m as u128 {
        return Err(DistributionError::invalid(format!(
            "population counts sum to {population_size}, expected m = {m}"
        )));
    }
    Ok(())
}

/// Probability of drawing exactly `sample_counts` (a sample of size `n`) without
/// replacement from a population of size `m` split into `k` types as `population_counts`.
///
/// `Π C(population[i], sample[i]) / C(m, n)`, formed in backend `B` and narrowed to `f64`
/// on return. Counts may be passed as slices, vectors, arrays or
/// [`Composition`](super::composition::Composition)s; all give the same result.
pub fn multivariate_hypergeometric_pdf_with<B, S, P>(
    m: u64,
    k: usize,
    n: u64,
    sample_counts: S,
    population_counts: P,
) -> Result<f64>
where
    B: Arithmetic,
    S: AsRef<[u64]>,
    P: AsRef<[u64]>,
{
    let sample = sample_counts.as_ref();
    let population = population_counts.as_ref();
    validate_composition(m, k, n, sample, population)?;

    let denominator = binomial_coefficient_with::<B>(m, n);
    let numerator = sample
        .iter()
        .zip(population)
        .fold(B::integer(1), |acc, (&drawn, &available)| {
            B::mul_integer(acc, &binomial_coefficient_with::<B>(available, drawn))
        });

    // n <= m after validation, so the denominator is at least 1
    let probability = B::div_real(
        B::real_from_integer(&numerator),
        &B::real_from_integer(&denominator),
    );
    let probability = B::to_f64(&probability);
    log::trace!("hypergeometric m={m} n={n} sample={sample:?} -> {probability}");
    Ok(probability)
}

/// Probability of observing `group_configuration[i]` outcomes in category `i` over `n`
/// independent trials that land in category `i` with probability `p[i]`.
///
/// Folds `p[i]^c[i] / c[i]!` one factor at a time so the running value never strays far
/// from the final probability, then multiplies by `n!`. Whether `p` sums to one is left
/// to the caller.
pub fn multinomial_pmf_with<B, C, P>(group_configuration: C, n: u64, p: P) -> Result<f64>
where
    B: Arithmetic,
    C: AsRef<[u64]>,
    P: AsRef<[f64]>,
{
    let counts = group_configuration.as_ref();
    let p = p.as_ref();
    if counts.len() != p.len() {
        return Err(DistributionError::invalid(format!(
            "group configuration ({}) and p ({}) must have the same length",
            counts.len(),
            p.len()
        )));
    }

    let n_factorial = factorial_with::<B>(n)?;
    let p = p
        .iter()
        .map(|&p_i| {
            B::real(p_i).ok_or_else(|| {
                DistributionError::invalid(format!("probability {p_i} is not finite"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut probability = real_one::<B>();
    for (&count, p_i) in counts.iter().zip(&p) {
        for j in 1..=count {
            probability = B::div_real_small(B::mul_real(probability, p_i), j);
        }
    }

    let probability = B::to_f64(&B::mul_real(probability, &n_factorial));
    log::trace!("multinomial n={n} counts={counts:?} -> {probability}");
    Ok(probability)
}

/// Like [`multinomial_pmf_with`], but `None` stands for "no sample size" and yields zero
/// once the argument lengths have been checked.
pub fn multinomial_pmf_or_zero_with<B, C, P>(group_configuration: C, n: Option<u64>, p: P) -> Result<f64>
where
    B: Arithmetic,
    C: AsRef<[u64]>,
    P: AsRef<[f64]>,
{
    match n {
        Some(n) => multinomial_pmf_with::<B, _, _>(group_configuration, n, p),
        None if group_configuration.as_ref().len() == p.as_ref().len() => Ok(0.0),
        None => Err(DistributionError::invalid(
            "group configuration and p must have the same length",
        )),
    }
}

pub fn multivariate_hypergeometric_pdf<S, P>(
    m: u64,
    k: usize,
    n: u64,
    sample_counts: S,
    population_counts: P,
) -> Result<f64>
where
    S: AsRef<[u64]>,
    P: AsRef<[u64]>,
{
    multivariate_hypergeometric_pdf_with::<Active, _, _>(m, k, n, sample_counts, population_counts)
}

pub fn multinomial_pmf<C, P>(group_configuration: C, n: u64, p: P) -> Result<f64>
where
    C: AsRef<[u64]>,
    P: AsRef<[f64]>,
{
    multinomial_pmf_with::<Active, _, _>(group_configuration, n, p)
}

pub fn multinomial_pmf_or_zero<C, P>(group_configuration: C, n: Option<u64>, p: P) -> Result<f64>
where
    C: AsRef<[u64]>,
    P: AsRef<[f64]>,
{
    multinomial_pmf_or_zero_with::<Active, _, _>(group_configuration, n, p)
}
