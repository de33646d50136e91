use super::{polynomial_coefficients, HashFamily, MERSENNE_61};

/// Polynomial-style hashing restricted to 64-bit state.
///
/// Every coefficient multiplies the key itself rather than a higher power of it, so
/// function `i` is `(sum_j c[i][j] * key mod P) mod size`. The product is formed in
/// 128 bits and reduced before it is added to the running sum.
#[derive(Debug, Clone)]
pub struct PolynomialFixed64 {
    coefficients: Vec<Vec<u64>>,
    size: usize,
}

impl HashFamily for PolynomialFixed64 {
    const NAME: &'static str = "K-size vector hashes bloom filter";

    fn new(size: usize, k: usize, seed: u64) -> Self {
        PolynomialFixed64 {
            coefficients: polynomial_coefficients(k, seed),
            size,
        }
    }

    #[inline]
    fn hash(self: &Self, i: usize, key: u64) -> usize {
        let sum = self.coefficients[i].iter().fold(0u64, |sum, coefficient| {
            let term = (*coefficient as u128 * key as u128 % MERSENNE_61 as u128) as u64;
            // both operands are below 2^61
            (sum + term) % MERSENNE_61
        });
        (sum % self.size as u64) as usize
    }

    fn num_hashes(self: &Self) -> usize {
        self.coefficients.len()
    }

    fn size(self: &Self) -> usize {
        self.size
    }
}
