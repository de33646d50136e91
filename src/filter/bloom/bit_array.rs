/// Fixed-size bit vector backing a bloom filter.
/// Bits are packed eight to a byte, bit `i` lives in byte `i >> 3` at position `i & 7`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitArray {
    bits: Vec<u8>,
    size: usize,
}

impl BitArray {
    pub fn new(size: usize) -> Self {
        let bytes = if size / 8 * 8 == size {
            size / 8
        } else {
            size / 8 + 1
        };
        BitArray {
            bits: vec![0; bytes],
            size,
        }
    }

    pub fn set(self: &mut Self, index: usize) {
        self.check_index(index);
        self.bits[index >> 3] |= 1 << (index & 7) as u8;
    }

    pub fn get(self: &Self, index: usize) -> bool {
        self.check_index(index);
        (self.bits[index >> 3] >> (index & 7) as u8) & 1 == 1
    }

    /// Number of addressable bits (m).
    pub fn len(self: &Self) -> usize {
        self.size
    }

    pub fn is_empty(self: &Self) -> bool {
        self.size == 0
    }

    pub fn count_ones(self: &Self) -> usize {
        self.bits.iter().map(|byte| byte.count_ones() as usize).sum()
    }

    #[inline]
    fn check_index(self: &Self, index: usize) {
        // the padding bits of the last byte are addressable in `bits`, so check against `size`
        assert!(
            index < self.size,
            "bit index {} out of range for bit array of size {}",
            index,
            self.size
        );
    }
}
