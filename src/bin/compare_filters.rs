use clap::Parser;
use hash_family_bloom::benchmarks::{
    report::{render, ReportFormat},
    run_benchmark, EvaluationConfig,
};

/// Compare the false positive rates of bloom filters built on different hash families.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of distinct keys inserted into each filter
    #[arg(short, long, default_value_t = 10_000)]
    n: usize,

    /// Keys are drawn from, and every key is queried in, [0, range)
    #[arg(short, long, default_value_t = 100_000_000)]
    range: u64,

    /// Bits per inserted key (m / n); k = round(log2(factor))
    #[arg(short, long, default_value_t = 10.0)]
    factor: f64,

    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Classify on the calling thread only
    #[arg(long, default_value_t = false)]
    sequential: bool,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = EvaluationConfig {
        n: args.n,
        range: args.range,
        factor: args.factor,
        seed: args.seed,
        parallel: !args.sequential,
    };
    eprintln!(
        "tp;compare_filters: n = {}, range = {}, m = {}, k = {}",
        config.n,
        config.range,
        config.size(),
        config.num_hashes()
    );
    let result = run_benchmark(&config)?;
    eprintln!(
        "tp;compare_filters: populated in {:?}, classified in {:?}",
        result.populate_duration, result.classify_duration
    );
    print!("{}", render(&result, args.format)?);
    Ok(())
}
