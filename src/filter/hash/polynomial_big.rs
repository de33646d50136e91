use num_bigint::BigUint;
use num_traits::Zero;

use super::{polynomial_coefficients, HashFamily, MERSENNE_61};

/// Polynomial hashing over arbitrary-precision integers.
///
/// Function `i` evaluates `sum_j c[i][j] * key^(j + 1) mod P`, then reduces by the
/// bit array size. The powers of `key` are kept exact, so intermediates grow to
/// roughly `64 * (k + 1)` bits before the sum is reduced.
#[derive(Debug, Clone)]
pub struct PolynomialBigInt {
    coefficients: Vec<Vec<BigUint>>,
    prime: BigUint,
    size: usize,
}

impl HashFamily for PolynomialBigInt {
    const NAME: &'static str = "BigInteger bloom filter";

    fn new(size: usize, k: usize, seed: u64) -> Self {
        let coefficients = polynomial_coefficients(k, seed)
            .into_iter()
            .map(|row| row.into_iter().map(BigUint::from).collect())
            .collect();
        PolynomialBigInt {
            coefficients,
            prime: BigUint::from(MERSENNE_61),
            size,
        }
    }

    fn hash(self: &Self, i: usize, key: u64) -> usize {
        let key = BigUint::from(key);
        let mut power = key.clone();
        let mut sum = BigUint::zero();
        for coefficient in &self.coefficients[i] {
            sum = (sum + &power * coefficient) % &self.prime;
            power *= &key;
        }
        let index = sum % self.size as u64;
        // index < size, so it fits in the lowest digit
        index.iter_u64_digits().next().unwrap_or(0) as usize
    }

    fn num_hashes(self: &Self) -> usize {
        self.coefficients.len()
    }

    fn size(self: &Self) -> usize {
        self.size
    }
}
