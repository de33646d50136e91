pub mod report;

use std::time::{Duration, Instant};

use anyhow::ensure;
use log::{debug, info};

use crate::evaluation::{classify, classify_parallel, populate, GroundTruth, Results};
use crate::filter::hash::pair_affine::NEGATIVE_VALUE_INDEX;
use crate::filter::{BoxedFilter, FilterKind};

/// Parameters of one comparison run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EvaluationConfig {
    /// Number of distinct keys inserted into every filter.
    pub n: usize,
    /// Keys are drawn from, and classified over, `[0, range)`.
    pub range: u64,
    /// Bits per inserted element, m / n.
    pub factor: f64,
    pub seed: u64,
    /// Classify on the rayon pool instead of the calling thread.
    pub parallel: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            n: 10_000,
            range: 100_000_000,
            factor: 10.0,
            seed: 0,
            parallel: true,
        }
    }
}

impl EvaluationConfig {
    /// Number of bits per filter, `round(factor * n)`.
    pub fn size(self: &Self) -> usize {
        (self.factor * self.n as f64).round() as usize
    }

    /// Number of hash functions, `round(log2(factor))`.
    pub fn num_hashes(self: &Self) -> usize {
        self.factor.log2().round() as usize
    }

    pub fn validate(self: &Self) -> anyhow::Result<()> {
        ensure!(self.n > 0, "n must be positive");
        ensure!(
            (self.n as u64) < self.range,
            "n ({}) must be smaller than the key range ({})",
            self.n,
            self.range
        );
        ensure!(
            self.factor.is_finite() && self.factor >= 1.0,
            "factor must be a finite number >= 1, got {}",
            self.factor
        );
        ensure!(
            self.num_hashes() >= 1,
            "factor {} yields no hash functions",
            self.factor
        );
        ensure!(
            self.size() > NEGATIVE_VALUE_INDEX,
            "filters need more than {} bits, got {}",
            NEGATIVE_VALUE_INDEX,
            self.size()
        );
        Ok(())
    }
}

/// Outcome of one filter in a run.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub kind: FilterKind,
    pub name: &'static str,
    pub fill_ratio: f64,
    pub results: Results,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    pub config: EvaluationConfig,
    pub filters: Vec<FilterOutcome>,
    pub populate_duration: Duration,
    pub classify_duration: Duration,
}

/// Build one filter per [`FilterKind`], fill them with a sampled ground truth and
/// classify every key of the range.
pub fn run_benchmark(config: &EvaluationConfig) -> anyhow::Result<BenchmarkResult> {
    config.validate()?;
    let (size, k) = (config.size(), config.num_hashes());

    let start_populating = Instant::now();
    let truth = GroundTruth::sample(config.n, config.range, config.seed);
    let mut filters: Vec<BoxedFilter> = FilterKind::ALL
        .iter()
        .map(|kind| kind.build(size, k, config.seed))
        .collect();
    for filter in &filters {
        debug!(
            "tp;filter [{}]: m = {}, k = {}",
            filter.name(),
            filter.size(),
            filter.num_hashes()
        );
    }
    populate(&mut filters, &truth);
    let populate_duration = start_populating.elapsed();
    info!(
        "tp;populate: added {} elems to {} filters in {:?}",
        truth.len(),
        filters.len(),
        populate_duration
    );

    let start_classifying = Instant::now();
    let results = if config.parallel {
        classify_parallel(&filters, &truth, 0..config.range)
    } else {
        classify(&filters, &truth, 0..config.range)
    };
    let classify_duration = start_classifying.elapsed();
    info!(
        "tp;classify: queried {} keys in {:?} ({} ops)",
        config.range,
        classify_duration,
        config.range as u128 * 1000 / std::cmp::max(classify_duration.as_millis(), 1)
    );

    let filters = FilterKind::ALL
        .iter()
        .zip(filters.iter())
        .zip(results)
        .map(|((kind, filter), results)| FilterOutcome {
            kind: *kind,
            name: filter.name(),
            fill_ratio: filter.fill_ratio(),
            results,
        })
        .collect();
    Ok(BenchmarkResult {
        config: config.clone(),
        filters,
        populate_duration,
        classify_duration,
    })
}
