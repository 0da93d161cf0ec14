use rand::Rng as _;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Injected randomness capability.
///
/// The deck consumes randomness only through this interface, so a seeded
/// generator can be substituted for tests and deterministic audit replay.
/// Fairness rests on seed secrecy, not generator strength; nothing here is
/// a cryptographic guarantee.
pub trait Rng {
    /// Uniform draw in `[0, 1)`.
    fn next(&mut self) -> f64;
}

/// Deterministic generator: identical seed, identical stream.
#[derive(Debug, Clone)]
pub struct SeededRng(SmallRng);

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl Rng for SeededRng {
    fn next(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}
