pub mod bloom;
pub mod hash;

use bloom::BloomFilter;
use hash::{HashFamily, PairAffine, PolynomialBigInt, PolynomialFixed64};

/// Basic Filter trait, implemented by a bloom filter for each hash family
pub trait Filter {
    fn add(self: &mut Self, key: u64);

    fn contains(self: &Self, key: u64) -> bool;

    fn name(self: &Self) -> &'static str;

    fn num_hashes(self: &Self) -> usize;

    fn size(self: &Self) -> usize;

    /// Fraction of bits currently set.
    fn fill_ratio(self: &Self) -> f64;
}

pub type BoxedFilter = Box<dyn Filter + Send + Sync>;

/// The hash families under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum FilterKind {
    PairAffine,
    PolynomialFixed64,
    PolynomialBigInt,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [
        FilterKind::PairAffine,
        FilterKind::PolynomialFixed64,
        FilterKind::PolynomialBigInt,
    ];

    pub fn name(self: &Self) -> &'static str {
        match self {
            FilterKind::PairAffine => PairAffine::NAME,
            FilterKind::PolynomialFixed64 => PolynomialFixed64::NAME,
            FilterKind::PolynomialBigInt => PolynomialBigInt::NAME,
        }
    }

    pub fn build(self: &Self, size: usize, k: usize, seed: u64) -> BoxedFilter {
        match self {
            FilterKind::PairAffine => Box::new(BloomFilter::<PairAffine>::new(size, k, seed)),
            FilterKind::PolynomialFixed64 => {
                Box::new(BloomFilter::<PolynomialFixed64>::new(size, k, seed))
            }
            FilterKind::PolynomialBigInt => {
                Box::new(BloomFilter::<PolynomialBigInt>::new(size, k, seed))
            }
        }
    }
}

/// False positive rate of an ideal bloom filter with `size` bits and `k` functions
/// after `n` insertions, `(1 - e^(-kn/m))^k`.
pub fn expected_false_positive_rate(n: usize, size: usize, k: usize) -> f64 {
    let k = k as f64;
    (1.0 - (-k * n as f64 / size as f64).exp()).powf(k)
}


#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::correctness_tests::*;
    use super::{expected_false_positive_rate, FilterKind};

    #[test]
    fn builds_every_kind() {
        for kind in FilterKind::ALL {
            let filter = kind.build(1000, 3, 0);
            assert_eq!(filter.name(), kind.name());
            assert_eq!(filter.size(), 1000);
            assert_eq!(filter.num_hashes(), 3);
        }
    }

    #[test]
    fn names_are_distinct() {
        let names: std::collections::HashSet<_> =
            FilterKind::ALL.iter().map(|kind| kind.name()).collect();
        assert_eq!(names.len(), FilterKind::ALL.len());
    }

    #[test]
    fn ideal_false_positive_rate() {
        // 10 bits per element, 3 functions
        let fp = expected_false_positive_rate(100, 1000, 3);
        assert!((fp - 0.017_412).abs() < 1e-5, "fp = {}", fp);
        assert_eq!(expected_false_positive_rate(0, 1000, 3), 0.0);
    }

    #[test]
    fn big_int_false_positive_rate() {
        const INPUTS: u64 = 10_000;
        const SAMPLE: u64 = 100_000;
        let mut filter = FilterKind::PolynomialBigInt.build(100_000, 3, 0);
        fill_from_range(&mut *filter, 0..INPUTS);
        let fp_rate = estimate_false_positive_rate(&*filter, INPUTS..INPUTS + SAMPLE);
        let expected = expected_false_positive_rate(INPUTS as usize, 100_000, 3);
        eprintln!("tp;false positive rate: {:.3}%", fp_rate * 100.0);
        assert!(
            fp_rate < expected * 1.5,
            "false positive rate: {:.3}% >= {:.3}%",
            fp_rate * 100.0,
            expected * 150.0
        );
    }

    proptest! {
        #[test]
        fn added_keys_are_contained(
            keys in proptest::collection::vec(any::<u64>(), 1..200),
            seed in any::<u64>(),
        ) {
            for kind in FilterKind::ALL {
                let mut filter = kind.build(1000, 3, seed);
                keys.iter().for_each(|key| filter.add(*key));
                for key in &keys {
                    prop_assert!(filter.contains(*key), "{} lost {}", kind.name(), key);
                }
            }
        }

        #[test]
        fn adding_twice_changes_nothing(
            keys in proptest::collection::vec(0..100_000_000u64, 1..100),
            probes in proptest::collection::vec(0..100_000_000u64, 1..100),
        ) {
            for kind in FilterKind::ALL {
                let mut once = kind.build(1000, 3, 0);
                let mut twice = kind.build(1000, 3, 0);
                for key in &keys {
                    once.add(*key);
                    twice.add(*key);
                    twice.add(*key);
                }
                prop_assert_eq!(once.fill_ratio(), twice.fill_ratio());
                for probe in &probes {
                    prop_assert_eq!(once.contains(*probe), twice.contains(*probe));
                }
            }
        }
    }
}
