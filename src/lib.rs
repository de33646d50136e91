//! Bloom filters over three hash-family constructions, and the harness that measures
//! how their false positive rates compare against a ground truth set.

pub mod benchmarks;
pub mod evaluation;
pub mod filter;
