//! Element identifier generation
//!
//! IDs look like `modal-k3x9q0a`: a prefix plus seven lowercase base-36
//! characters drawn from a pseudo-random source. Nothing tracks issued IDs;
//! uniqueness is only practical, not guaranteed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Prefix used when the caller passes an empty one
pub const DEFAULT_PREFIX: &str = "id";

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 7;

/// Generate an ID from the thread-local RNG
pub fn generate_id(prefix: &str) -> String {
    compose(prefix, &mut rand::rng())
}

fn compose<R: Rng>(prefix: &str, rng: &mut R) -> String {
    let prefix = if prefix.is_empty() { DEFAULT_PREFIX } else { prefix };
    let mut id = String::with_capacity(prefix.len() + 1 + SUFFIX_LEN);
    id.push_str(prefix);
    id.push('-');
    for _ in 0..SUFFIX_LEN {
        id.push(ALPHABET[rng.random_range(0..ALPHABET.len())] as char);
    }
    id
}

/// ID source owned by a [`BootstrapManager`](crate::BootstrapManager)
pub struct IdGenerator {
    rng: StdRng,
}

impl IdGenerator {
    /// Generator seeded from the thread RNG
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Deterministic generator, for reproducible markup
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Next ID with the given prefix
    pub fn next_id(&mut self, prefix: &str) -> String {
        compose(prefix, &mut self.rng)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGenerator").finish_non_exhaustive()
    }
}
