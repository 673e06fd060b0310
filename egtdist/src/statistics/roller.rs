use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::Distribution;

/// The randomness source handed to every stochastic behavior.
///
/// There is no global generator: each worker owns a `Roller`, usually obtained through
/// [`Roller::fork`], so parallel draws stay independent and seeded runs are reproducible.
#[derive(Debug, Clone)]
pub struct Roller {
    rng: StdRng,
}

impl Roller {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let rng = StdRng::from_os_rng();
        Roller { rng }
    }

    /// Creates a new `Roller` instance with a different random seed.
    /// Useful for creating independent random number generators in multi-threaded contexts.
    pub fn fork(&mut self) -> Self {
        let mut seed = [0u8; 32];
        self.rng.fill(&mut seed);
        let rng = StdRng::from_seed(seed);
        Roller { rng }
    }

    pub fn from_seed(seed: u64) -> Self {
        let rng = StdRng::seed_from_u64(seed);
        Roller { rng }
    }

    /// Uniform draw from `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.random()
    }

    pub fn coin(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    pub fn sample<T, D: Distribution<T>>(&mut self, distribution: &D) -> T {
        distribution.sample(&mut self.rng)
    }

    #[cfg(test)]
    pub fn test_rng() -> Self {
        Self::from_seed(42)
    }
}

#[cfg(test)]
mod tests {
    use rand_distr::Bernoulli;

    use super::*;

    #[test]
    fn test_seeded_rollers_repeat() {
        let mut a = Roller::from_seed(7);
        let mut b = Roller::from_seed(7);
        for _ in 0..100 {
            assert_eq!(a.uniform(), b.uniform());
        }
    }

    #[test]
    fn test_uniform_range() {
        let mut rng = Roller::test_rng();
        for _ in 0..10000 {
            let x = rng.uniform();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_forks_diverge() {
        let mut parent = Roller::test_rng();
        let mut first = parent.fork();
        let mut second = parent.fork();
        let a: Vec<f64> = (0..8).map(|_| first.uniform()).collect();
        let b: Vec<f64> = (0..8).map(|_| second.uniform()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_sample_bernoulli_edges() {
        let mut rng = Roller::test_rng();
        let never = Bernoulli::new(0.0).unwrap();
        let always = Bernoulli::new(1.0).unwrap();
        for _ in 0..1000 {
            assert!(!rng.sample(&never));
            assert!(rng.sample(&always));
        }
        let heads = (0..10000).filter(|_| rng.coin()).count();
        assert!((4500..5500).contains(&heads));
    }
}
