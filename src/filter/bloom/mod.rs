pub mod bit_array;

pub use bit_array::BitArray;

use crate::filter::hash::HashFamily;
use crate::filter::Filter;

/// Bloom filter over a single bit array, with the bit positions of a key chosen by
/// one [`HashFamily`].
#[derive(Debug, Clone)]
pub struct BloomFilter<H> {
    bits: BitArray,
    hashes: H,
}

impl<H: HashFamily> BloomFilter<H> {
    /// `size` bits (m) and `k` hash functions, coefficients derived from `seed`.
    pub fn new(size: usize, k: usize, seed: u64) -> Self {
        Self::with_hashes(H::new(size, k, seed))
    }

    pub fn with_hashes(hashes: H) -> Self {
        BloomFilter {
            bits: BitArray::new(hashes.size()),
            hashes,
        }
    }

    pub fn hashes(self: &Self) -> &H {
        &self.hashes
    }

    pub fn bits(self: &Self) -> &BitArray {
        &self.bits
    }
}

impl<H: HashFamily> Filter for BloomFilter<H> {
    fn add(self: &mut Self, key: u64) {
        for i in 0..self.hashes.num_hashes() {
            let bit_to_set = self.hashes.hash(i, key);
            self.bits.set(bit_to_set);
        }
    }

    fn contains(self: &Self, key: u64) -> bool {
        (0..self.hashes.num_hashes()).all(|i| self.bits.get(self.hashes.hash(i, key)))
    }

    fn name(self: &Self) -> &'static str {
        H::NAME
    }

    fn num_hashes(self: &Self) -> usize {
        self.hashes.num_hashes()
    }

    fn size(self: &Self) -> usize {
        self.bits.len()
    }

    fn fill_ratio(self: &Self) -> f64 {
        self.bits.count_ones() as f64 / self.bits.len() as f64
    }
}
