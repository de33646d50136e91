use rand::Rng;

use super::{coefficient_rng, HashFamily};

/// Index returned whenever the affine value comes out negative.
pub const NEGATIVE_VALUE_INDEX: usize = 2;

/// Affine hashing, `(a_i * key + b_i) mod size` per function.
///
/// The value is computed in signed 64-bit arithmetic with wrapping overflow. A key
/// large enough to wrap the product (or a key above `i64::MAX`, which reads as
/// negative) yields a negative remainder, and such keys all map to
/// [`NEGATIVE_VALUE_INDEX`] instead of a reduced index.
#[derive(Debug, Clone)]
pub struct PairAffine {
    coefficients: Vec<(i64, i64)>,
    size: usize,
}

impl PairAffine {
    /// Build a family from explicit `(a, b)` pairs, one per hash function.
    pub fn from_coefficients(size: usize, coefficients: Vec<(i64, i64)>) -> Self {
        PairAffine { coefficients, size }
    }

    pub fn coefficients(self: &Self) -> &[(i64, i64)] {
        &self.coefficients
    }
}

/// `|x|` of a random 32-bit integer, at least 1. `|i32::MIN|` wraps to itself and is
/// floored like zero.
fn affine_coefficient(rng: &mut impl Rng) -> i64 {
    rng.gen::<i32>().wrapping_abs().max(1) as i64
}

impl HashFamily for PairAffine {
    const NAME: &'static str = "Pair hash bloom filter";

    fn new(size: usize, k: usize, seed: u64) -> Self {
        let mut rng = coefficient_rng(seed);
        let coefficients = (0..k)
            .map(|_| {
                let a = affine_coefficient(&mut rng);
                let b = affine_coefficient(&mut rng);
                (a, b)
            })
            .collect();
        PairAffine { coefficients, size }
    }

    #[inline]
    fn hash(self: &Self, i: usize, key: u64) -> usize {
        let (a, b) = self.coefficients[i];
        let value = a.wrapping_mul(key as i64).wrapping_add(b) % self.size as i64;
        if value < 0 {
            return NEGATIVE_VALUE_INDEX;
        }
        value as usize
    }

    fn num_hashes(self: &Self) -> usize {
        self.coefficients.len()
    }

    fn size(self: &Self) -> usize {
        self.size
    }
}
