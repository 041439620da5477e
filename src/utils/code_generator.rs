//! Short code generation.
//!
//! Codes are fixed-width random strings over `[a-zA-Z0-9]`. Generation is
//! exposed as the [`CodeGenerator`] capability so services can be driven by a
//! seeded or scripted generator in tests instead of process-wide random state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Length of every generated short code.
pub const CODE_LENGTH: usize = 5;

/// Alphabet codes are drawn from (62 symbols).
pub const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Produces candidate short codes.
///
/// Implementations are pure generators: they never consult storage, so the
/// caller is responsible for detecting collisions.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform random generator backed by a [`StdRng`] seeded once.
pub struct RandomCodeGenerator {
    rng: Mutex<StdRng>,
}

impl RandomCodeGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a deterministic generator. Two generators with the same seed
    /// yield the same sequence of codes.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        // A poisoned lock only means another thread panicked mid-draw; the
        // RNG state is still usable.
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        random_code(&mut *rng)
    }
}

/// Draws a [`CODE_LENGTH`]-character code from `rng`.
pub fn random_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Returns true if `code` has the shape of a generated code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| CODE_ALPHABET.contains(&b))
}
