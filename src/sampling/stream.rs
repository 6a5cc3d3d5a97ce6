use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// The single random stream an engine draws from, both for the initial
/// weights and for every Bernoulli trial during training.
///
/// The seed is kept so a run started from entropy can be replayed.
#[derive(Debug, Clone)]
pub struct RandomStream {
    seed: u64,
    rng: ChaCha8Rng,
}

impl RandomStream {
    pub fn with_seed(seed: u64) -> RandomStream {
        RandomStream {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeds once from the thread-local entropy source.
    pub fn from_entropy() -> RandomStream {
        RandomStream::with_seed(rand::thread_rng().gen())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw on [0, 1).
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    pub fn standard_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }
}
