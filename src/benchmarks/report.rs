use std::fmt::Write;

use crate::benchmarks::{BenchmarkResult, FilterOutcome};
use crate::filter::expected_false_positive_rate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Csv,
    Json,
}

/// One line of the report, flattened for CSV and JSON output.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ReportRow {
    pub filter: &'static str,
    pub n: usize,
    pub range: u64,
    pub m: usize,
    pub k: usize,
    pub tp: u64,
    pub tn: u64,
    pub fp: u64,
    #[serde(rename = "fn")]
    pub fn_: u64,
    pub tpr: f64,
    pub tnr: f64,
    pub fnr: f64,
    pub fpr: f64,
    pub expected_fpr: f64,
    pub fill_ratio: f64,
}

impl ReportRow {
    fn new(result: &BenchmarkResult, outcome: &FilterOutcome) -> Self {
        let config = &result.config;
        let r = &outcome.results;
        ReportRow {
            filter: outcome.name,
            n: config.n,
            range: config.range,
            m: config.size(),
            k: config.num_hashes(),
            tp: r.true_positives,
            tn: r.true_negatives,
            fp: r.false_positives,
            fn_: r.false_negatives,
            tpr: r.true_positive_rate(),
            tnr: r.true_negative_rate(),
            fnr: r.false_negative_rate(),
            fpr: r.false_positive_rate(),
            expected_fpr: expected_false_positive_rate(
                config.n,
                config.size(),
                config.num_hashes(),
            ),
            fill_ratio: outcome.fill_ratio,
        }
    }
}

pub fn report_rows(result: &BenchmarkResult) -> Vec<ReportRow> {
    result
        .filters
        .iter()
        .map(|outcome| ReportRow::new(result, outcome))
        .collect()
}

pub fn render(result: &BenchmarkResult, format: ReportFormat) -> anyhow::Result<String> {
    let rows = report_rows(result);
    match format {
        ReportFormat::Text => Ok(render_text(&rows)),
        ReportFormat::Csv => {
            let mut out = result_csv_header();
            out.push('\n');
            for row in &rows {
                out.push_str(&result_csv_line(row));
                out.push('\n');
            }
            Ok(out)
        }
        ReportFormat::Json => Ok(serde_json::to_string_pretty(&rows)? + "\n"),
    }
}

const SEPARATOR: &str = "------------------------------------------------";

fn render_text(rows: &[ReportRow]) -> String {
    let mut out = String::new();
    for row in rows {
        // writing into a String cannot fail
        let _ = writeln!(out, "{}", SEPARATOR);
        let _ = writeln!(out, "Results for [{}]", row.filter);
        let _ = writeln!(out, "TP = {:6}\tTPR = {:1.4}", row.tp, row.tpr);
        let _ = writeln!(out, "TN = {:6}\tTNR = {:1.4}", row.tn, row.tnr);
        let _ = writeln!(out, "FN = {:6}\tFNR = {:1.4}", row.fn_, row.fnr);
        let _ = writeln!(out, "FP = {:6}\tFPR = {:1.4}", row.fp, row.fpr);
        let _ = writeln!(
            out,
            "expected FPR = {:1.4}\tfill = {:1.4}",
            row.expected_fpr, row.fill_ratio
        );
        let _ = writeln!(out, "{}", SEPARATOR);
    }
    out
}

pub fn result_csv_header() -> String {
    "filter,n,range,m,k,tp,tn,fp,fn,tpr,tnr,fnr,fpr,expected_fpr,fill_ratio".to_string()
}

pub fn result_csv_line(row: &ReportRow) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
        row.filter,
        row.n,
        row.range,
        row.m,
        row.k,
        row.tp,
        row.tn,
        row.fp,
        row.fn_,
        row.tpr,
        row.tnr,
        row.fnr,
        row.fpr,
        row.expected_fpr,
        row.fill_ratio,
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::{render, report_rows, result_csv_header, ReportFormat};
    use crate::benchmarks::{BenchmarkResult, EvaluationConfig, FilterOutcome};
    use crate::evaluation::Results;
    use crate::filter::FilterKind;

    fn result() -> BenchmarkResult {
        BenchmarkResult {
            config: EvaluationConfig {
                n: 100,
                range: 10_000,
                factor: 10.0,
                seed: 0,
                parallel: false,
            },
            filters: vec![FilterOutcome {
                kind: FilterKind::PairAffine,
                name: FilterKind::PairAffine.name(),
                fill_ratio: 0.25,
                results: Results {
                    true_positives: 100,
                    true_negatives: 9_801,
                    false_positives: 99,
                    false_negatives: 0,
                },
            }],
            populate_duration: Duration::from_millis(1),
            classify_duration: Duration::from_millis(2),
        }
    }

    #[test]
    fn rows_carry_rates() {
        let rows = report_rows(&result());
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!((row.m, row.k), (1000, 3));
        assert_eq!(row.tpr, 1.0);
        assert_eq!(row.fnr, 0.0);
        assert_eq!(row.fpr, 0.01);
        assert_eq!(row.tnr, 0.99);
    }

    #[test]
    fn text_matches_classic_layout() -> anyhow::Result<()> {
        let text = render(&result(), ReportFormat::Text)?;
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1], "Results for [Pair hash bloom filter]");
        assert_eq!(lines[2], "TP =    100\tTPR = 1.0000");
        assert_eq!(lines[3], "TN =   9801\tTNR = 0.9900");
        assert_eq!(lines[4], "FN =      0\tFNR = 0.0000");
        assert_eq!(lines[5], "FP =     99\tFPR = 0.0100");
        assert!(lines[6].starts_with("expected FPR = 0.0174"));
        Ok(())
    }

    #[test]
    fn csv_has_header_and_one_line_per_filter() -> anyhow::Result<()> {
        let csv = render(&result(), ReportFormat::Csv)?;
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], result_csv_header());
        assert!(lines[1].starts_with("Pair hash bloom filter,100,10000,1000,3,100,9801,99,0,"));
        assert_eq!(
            lines[0].split(',').count(),
            lines[1].split(',').count()
        );
        Ok(())
    }

    #[test]
    fn json_is_an_array_of_rows() -> anyhow::Result<()> {
        let json = render(&result(), ReportFormat::Json)?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        let rows = value.as_array().expect("array of rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["filter"], "Pair hash bloom filter");
        assert_eq!(rows[0]["fn"], 0u64);
        assert_eq!(rows[0]["fp"], 99u64);
        Ok(())
    }
}
