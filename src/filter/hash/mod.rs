pub mod pair_affine;
pub mod polynomial_big;
pub mod polynomial_fixed;

pub use pair_affine::PairAffine;
pub use polynomial_big::PolynomialBigInt;
pub use polynomial_fixed::PolynomialFixed64;

use rand::{distributions::Uniform, Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// The Mersenne prime 2^61 - 1 all polynomial families reduce by.
pub const MERSENNE_61: u64 = (1 << 61) - 1;

/// Exclusive upper bound for polynomial coefficients, min(2^31 - 1, P).
pub const COEFFICIENT_BOUND: u64 = i32::MAX as u64;

/// A family of `k` hash functions mapping a key to a bit index in `[0, size)`.
///
/// Construction is deterministic: the same `(size, k, seed)` always yields the same
/// coefficients and therefore the same bit indices.
pub trait HashFamily {
    /// Display name of the family, used to label results.
    const NAME: &'static str;

    fn new(size: usize, k: usize, seed: u64) -> Self
    where
        Self: Sized;

    /// Evaluate hash function `i` (with `i < k`) on `key`.
    fn hash(self: &Self, i: usize, key: u64) -> usize;

    fn num_hashes(self: &Self) -> usize;

    fn size(self: &Self) -> usize;
}

/// The generator coefficients are drawn from. Owned by the constructor and dropped
/// once the family is built.
pub(crate) fn coefficient_rng(seed: u64) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

/// `k` rows of `k` coefficients, uniform in `[0, COEFFICIENT_BOUND)`.
/// Both polynomial families draw the same rows for the same seed.
pub(crate) fn polynomial_coefficients(k: usize, seed: u64) -> Vec<Vec<u64>> {
    let mut rng = coefficient_rng(seed);
    let distribution = Uniform::new(0, COEFFICIENT_BOUND);
    (0..k)
        .map(|_| (&mut rng).sample_iter(distribution).take(k).collect())
        .collect()
}
