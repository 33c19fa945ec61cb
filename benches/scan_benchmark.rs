// Performance benchmarks for PI-Sentinel
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pi_sentinel::context::ContextValidator;
use pi_sentinel::pipeline::{FileExecutor, WorkerPool};
use pi_sentinel::risk::RiskScorer;
use pi_sentinel::{default_detectors, default_validators, CancelToken, FileJob, FileRecord};
use std::hint::black_box;
use std::path::PathBuf;
use std::sync::Arc;

const SMALL_FILE: &str = "package billing\n\nconst customerTFN = \"123456782\"\nvar abn = \"33051775556\"\nbsb := \"062-000\"\ncontact := \"jane.citizen@example.com.au\"\n";

fn job(index: usize, content: &str) -> FileJob {
    let path = PathBuf::from(format!("src/file_{}.go", index));
    FileJob {
        path: path.clone(),
        content: content.to_string(),
        record: FileRecord {
            path,
            size: content.len() as u64,
            is_binary: false,
            is_hidden: false,
        },
    }
}

fn executor() -> Arc<FileExecutor> {
    let validators = Arc::new(default_validators());
    Arc::new(FileExecutor::new(
        default_detectors(&validators),
        ContextValidator::new(),
        RiskScorer::default(),
    ))
}

/// Benchmark: single-file pipeline throughput (detectors + context + risk)
fn bench_single_file_pipeline(c: &mut Criterion) {
    let exec = executor();
    let cancel = CancelToken::new();
    let sample = job(0, SMALL_FILE);

    c.bench_function("single_file_pipeline", |b| {
        b.iter(|| {
            let result = exec.process(black_box(&sample), &cancel);
            black_box(result);
        });
    });
}

/// Benchmark: individual detectors on a representative file
fn bench_detector_performance(c: &mut Criterion) {
    let mut group = c.benchmark_group("detector_performance");

    let validators = Arc::new(default_validators());
    let detectors = default_detectors(&validators);

    for name in ["tfn", "abn", "medicare", "email", "credit_card"] {
        if let Some(detector) = detectors.iter().find(|d| d.name() == name) {
            group.bench_with_input(BenchmarkId::new("detector", name), &SMALL_FILE, |b, text| {
                b.iter(|| {
                    let findings = detector.detect(black_box(text), "bench.go");
                    black_box(findings);
                });
            });
        }
    }

    group.finish();
}

/// Benchmark: worker pool fan-out over batches of small files
fn bench_worker_pool_batches(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_pool");
    group.sample_size(10);

    for count in [100usize, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let jobs: Vec<FileJob> = (0..count).map(|i| job(i, SMALL_FILE)).collect();
                let pool = WorkerPool::new(executor(), num_cpus::get(), 64);
                let results = pool.process_batch(jobs, &CancelToken::new()).unwrap();
                black_box(results);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_file_pipeline,
    bench_detector_performance,
    bench_worker_pool_batches
);
criterion_main!(benches);
