//! Exact probability mass functions for finite-population evolutionary dynamics.
//!
//! Transition probabilities between population states are built from multivariate
//! hypergeometric and multinomial probabilities. For populations of a few hundred
//! individuals the binomial coefficients and factorials involved no longer fit in `u64`
//! or `f64`, so every function here is written against an [`arithmetic::Arithmetic`]
//! backend:
//!
//! - [`arithmetic::Fixed`] (default): `u128`/`f64`, fast, bounded range.
//! - [`arithmetic::Extended`] (`extended` feature): unbounded integers and exact rationals.
//!
//! The crate-level functions use [`arithmetic::Active`]. The `*_with` variants take the
//! backend as a type parameter.

pub mod arithmetic;
pub mod behaviors;
pub mod error;
pub mod statistics;

pub mod prelude {
    pub use crate::{
        arithmetic::{ACTIVE_MODE, Active, Arithmetic, ArithmeticMode, Extended, Fixed},
        behaviors::{
            Action, Behavior,
            game::{GameRecord, play},
            two_actions::*,
        },
        error::{DistributionError, Result},
        statistics::{
            combinatorics::{
                binomial_coefficient, binomial_coefficient_or_zero, binomial_coefficient_or_zero_with,
                binomial_coefficient_with, factorial, factorial_with, stars_bars, stars_bars_with,
            },
            composition::{Composition, compositions},
            pmf::{
                multinomial_pmf, multinomial_pmf_or_zero, multinomial_pmf_or_zero_with,
                multinomial_pmf_with, multivariate_hypergeometric_pdf,
                multivariate_hypergeometric_pdf_with,
            },
            roller::Roller,
        },
    };
}
