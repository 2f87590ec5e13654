//! Performance benchmarks for the load probe
//!
//! Long runs collect hundreds of thousands of samples, so the end-of-run
//! statistics, histogram binning and report rendering are measured at
//! several sample counts.

use clap::Parser;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use http_load_probe::{
    cli::Cli,
    config::parser::ConfigParser,
    models::{Config, ProbeOutcome, RunResult},
    output::{OutputFormatterFactory, Reporter},
    stats::{percentile, sorted_copy, Histogram, LatencySummary},
};
use std::hint::black_box;

/// Deterministic latency samples with a long tail
fn create_sample_latencies(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let base = 5.0 + (i % 37) as f64 * 0.7;
            if i % 100 == 0 { base * 20.0 } else { base }
        })
        .collect()
}

fn create_sample_result(count: usize) -> RunResult {
    let mut result = RunResult::new();
    for (i, latency_ms) in create_sample_latencies(count).into_iter().enumerate() {
        let outcome = if i % 50 == 0 {
            ProbeOutcome::HttpError { status: 503, latency_ms }
        } else {
            ProbeOutcome::Success { latency_ms }
        };
        result.record(&outcome);
    }
    result
}

/// Benchmark statistics calculation performance
fn benchmark_statistics_calculation(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    for size in [100usize, 1_000, 10_000, 100_000].iter() {
        let samples = create_sample_latencies(*size);

        group.bench_with_input(BenchmarkId::new("latency_summary", size), size, |b, _| {
            b.iter(|| {
                let summary = LatencySummary::from_samples(black_box(&samples), 0);
                black_box(summary);
            });
        });

        group.bench_with_input(BenchmarkId::new("percentiles_presorted", size), size, |b, _| {
            let sorted = sorted_copy(&samples);
            b.iter(|| {
                let p95 = percentile(black_box(&sorted), 95.0);
                let p99 = percentile(black_box(&sorted), 99.0);
                black_box((p95, p99));
            });
        });

        group.bench_with_input(BenchmarkId::new("histogram_50_bins", size), size, |b, _| {
            b.iter(|| {
                let histogram = Histogram::from_values(black_box(&samples), 50);
                black_box(histogram);
            });
        });
    }

    group.finish();
}

/// Benchmark result recording and report rendering
fn benchmark_result_processing(c: &mut Criterion) {
    let mut group = c.benchmark_group("result_processing");

    group.bench_function("record_10k_outcomes", |b| {
        let outcome = ProbeOutcome::Success { latency_ms: 12.5 };
        b.iter(|| {
            let mut result = RunResult::new();
            for _ in 0..10_000 {
                result.record(black_box(&outcome));
            }
            black_box(result);
        });
    });

    let result = create_sample_result(10_000);

    group.bench_function("render_text_report", |b| {
        let reporter = Reporter::new(OutputFormatterFactory::create_plain_formatter());
        b.iter(|| {
            let text = reporter.render(black_box(&result)).unwrap();
            black_box(text);
        });
    });

    group.bench_function("render_json_report", |b| {
        let reporter = Reporter::json();
        b.iter(|| {
            let json = reporter.render(black_box(&result)).unwrap();
            black_box(json);
        });
    });

    group.finish();
}

/// Benchmark configuration parsing from various sources
fn benchmark_config_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("config_parsing");

    let args = vec![
        "load-probe",
        "--url", "http://127.0.0.1:8080/albums",
        "--duration", "30",
        "--timeout", "10",
        "--concurrency", "4",
    ];

    group.bench_function("parse_cli_args", |b| {
        b.iter(|| {
            let cli = Cli::try_parse_from(black_box(&args)).unwrap();
            black_box(cli);
        });
    });

    group.bench_function("validate_config", |b| {
        let config = Config::default();
        b.iter(|| {
            let result = black_box(&config).validate();
            black_box(result.is_ok());
        });
    });

    group.bench_function("parse_from_cli", |b| {
        let cli = Cli::try_parse_from(&args).unwrap();
        b.iter(|| {
            let parser = ConfigParser::new(black_box(cli.clone()));
            let config = parser.parse_with(|_| None).unwrap();
            black_box(config);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_statistics_calculation,
    benchmark_result_processing,
    benchmark_config_parsing
);

criterion_main!(benches);
