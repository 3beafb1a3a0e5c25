/// Source of uniformly distributed random numbers
/// used to initialize weights and biases of new networks.
pub trait Sampler {
    /// Return random number from `[min, max)` range.
    fn sample(&mut self, min: f64, max: f64) -> f64;
}

impl<T: FnMut(f64, f64) -> f64> Sampler for T {
    #[inline]
    fn sample(&mut self, min: f64, max: f64) -> f64 {
        self(min, max)
    }
}

#[derive(Debug, Clone)]
/// `Sampler` implementation which uses `fastrand` generator.
pub struct FastrandSampler {
    rng: fastrand::Rng
}

impl Default for FastrandSampler {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl FastrandSampler {
    #[inline]
    /// Create new sampler seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new()
        }
    }

    #[inline]
    /// Create new sampler with fixed seed.
    ///
    /// Samplers with the same seed produce the same sequence of numbers.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed)
        }
    }
}

impl Sampler for FastrandSampler {
    #[inline]
    fn sample(&mut self, min: f64, max: f64) -> f64 {
        self.rng.f64() * (max - min) + min
    }
}

#[test]
/// Seeded samplers are reproducible and stay within requested range.
fn test_fastrand_sampler() {
    let mut a = FastrandSampler::with_seed(42);
    let mut b = FastrandSampler::with_seed(42);

    for _ in 0..1000 {
        let value = a.sample(-1.0, 1.0);

        assert_eq!(value, b.sample(-1.0, 1.0));
        assert!((-1.0..1.0).contains(&value));
    }
}
