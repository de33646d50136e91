use std::collections::HashSet;
use std::ops::{AddAssign, Range};

use itertools::Itertools;
use rand::{distributions::Uniform, Rng, SeedableRng};
use rayon::prelude::*;

use crate::filter::BoxedFilter;

/// Keys handed to a single rayon task during classification.
const CLASSIFY_CHUNK: u64 = 1 << 16;

/// The set of keys actually inserted into the filters, used as ground truth when
/// classifying filter answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundTruth {
    keys: HashSet<u64>,
    range: u64,
}

impl GroundTruth {
    /// Draw `n` distinct keys uniformly from `[0, range)`.
    ///
    /// Draws are rejected until `n` distinct keys have been collected, so `n` must not
    /// exceed `range`.
    pub fn sample(n: usize, range: u64, seed: u64) -> Self {
        assert!(
            n as u64 <= range,
            "cannot draw {} distinct keys from a range of {}",
            n,
            range
        );
        let mut data_rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut keys = HashSet::with_capacity(n);
        if n > 0 {
            let key_distribution = Uniform::new(0, range);
            while keys.len() < n {
                keys.insert(data_rng.sample(key_distribution));
            }
        }
        GroundTruth { keys, range }
    }

    pub fn len(self: &Self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(self: &Self) -> bool {
        self.keys.is_empty()
    }

    pub fn range(self: &Self) -> u64 {
        self.range
    }

    pub fn contains(self: &Self, key: u64) -> bool {
        self.keys.contains(&key)
    }

    pub fn iter(self: &Self) -> impl Iterator<Item = u64> + '_ {
        self.keys.iter().copied()
    }
}

/// Confusion counts of one filter against the ground truth.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Results {
    pub true_positives: u64,
    pub true_negatives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
}

impl Results {
    /// Tally one key given the filter's answer and the ground truth.
    #[inline]
    pub fn record(self: &mut Self, in_filter: bool, in_truth: bool) {
        match (in_filter, in_truth) {
            (true, true) => self.true_positives += 1,
            (false, false) => self.true_negatives += 1,
            (false, true) => self.false_negatives += 1,
            (true, false) => self.false_positives += 1,
        }
    }

    /// Keys that are in the ground truth, `TP + FN`.
    pub fn positives(self: &Self) -> u64 {
        self.true_positives + self.false_negatives
    }

    /// Keys that are not in the ground truth, `TN + FP`.
    pub fn negatives(self: &Self) -> u64 {
        self.true_negatives + self.false_positives
    }

    pub fn true_positive_rate(self: &Self) -> f64 {
        ratio(self.true_positives, self.positives())
    }

    pub fn true_negative_rate(self: &Self) -> f64 {
        ratio(self.true_negatives, self.negatives())
    }

    pub fn false_negative_rate(self: &Self) -> f64 {
        ratio(self.false_negatives, self.positives())
    }

    pub fn false_positive_rate(self: &Self) -> f64 {
        ratio(self.false_positives, self.negatives())
    }
}

fn ratio(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

impl AddAssign for Results {
    fn add_assign(&mut self, other: Self) {
        self.true_positives += other.true_positives;
        self.true_negatives += other.true_negatives;
        self.false_positives += other.false_positives;
        self.false_negatives += other.false_negatives;
    }
}

/// Add every ground truth key to every filter.
pub fn populate(filters: &mut [BoxedFilter], truth: &GroundTruth) {
    for filter in filters.iter_mut() {
        truth.iter().for_each(|key| filter.add(key));
    }
}

/// Classify every key in `keys` against each filter, one [`Results`] per filter.
pub fn classify(filters: &[BoxedFilter], truth: &GroundTruth, keys: Range<u64>) -> Vec<Results> {
    let mut results = vec![Results::default(); filters.len()];
    for key in keys {
        let in_truth = truth.contains(key);
        for (filter, result) in filters.iter().zip(results.iter_mut()) {
            result.record(filter.contains(key), in_truth);
        }
    }
    results
}

/// Same as [`classify`], with the key range split into chunks that are classified on
/// the rayon pool and merged by addition.
pub fn classify_parallel(
    filters: &[BoxedFilter],
    truth: &GroundTruth,
    keys: Range<u64>,
) -> Vec<Results> {
    let num_keys = keys.end.saturating_sub(keys.start);
    let num_chunks = (num_keys + CLASSIFY_CHUNK - 1) / CLASSIFY_CHUNK;
    (0..num_chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = keys.start + chunk * CLASSIFY_CHUNK;
            let end = std::cmp::min(start + CLASSIFY_CHUNK, keys.end);
            classify(filters, truth, start..end)
        })
        .reduce(|| vec![Results::default(); filters.len()], merge)
}

fn merge(mut left: Vec<Results>, right: Vec<Results>) -> Vec<Results> {
    for (total, partial) in left.iter_mut().zip_eq(right) {
        *total += partial;
    }
    left
}
