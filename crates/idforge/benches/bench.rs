use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use idforge::{
    BatchOrchestrator, ExportFormat, GenerationSettings, IdKind, StrategyRegistry, analyze,
    export_job, format_identifier,
};
use std::time::Instant;
use tokio::runtime::Builder;

// Number of identifiers generated per benchmark iteration.
const TOTAL_IDS: usize = 4096;

/// Raw generation and formatting, without analysis.
fn bench_generate_raw(c: &mut Criterion) {
    let registry: StrategyRegistry = StrategyRegistry::default();
    let mut group = c.benchmark_group("generate_raw");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    for kind in IdKind::ALL {
        let settings = GenerationSettings {
            custom_alphabet: Some("0123456789abcdef".into()),
            custom_length: (kind == IdKind::Custom).then_some(16),
            ..GenerationSettings::new(kind, TOTAL_IDS)
        };
        group.bench_function(format!("{kind}/elems/{TOTAL_IDS}"), |b| {
            b.iter(|| {
                for _ in 0..TOTAL_IDS {
                    let raw = registry.generate_raw(kind, &settings).unwrap();
                    black_box(format_identifier(&raw, settings.format, &settings));
                }
            });
        });
    }

    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    group.throughput(Throughput::Elements(1));

    for (kind, value) in [
        (IdKind::UuidV4, "0193abcd-ef01-4a2b-8c3d-0123456789ab"),
        (IdKind::Ulid, "01JH2X4K9QZ8M3V7N5R6T0W1YB"),
        (IdKind::NanoId, "V1StGXR8_Z5jdHi6B-myT"),
    ] {
        group.bench_function(kind.as_str(), |b| {
            b.iter(|| black_box(analyze(black_box(value), kind)));
        });
    }

    group.finish();
}

/// A full job: chunk loop, yields, analysis and statistics.
fn bench_batch(c: &mut Criterion) {
    let rt = Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap();

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    for chunk_size in [64, 512] {
        group.bench_function(format!("chunk/{chunk_size}/elems/{TOTAL_IDS}"), |b| {
            b.to_async(&rt).iter_custom(|iters| async move {
                let orchestrator = BatchOrchestrator::new();
                let start = Instant::now();
                for _ in 0..iters {
                    let settings = GenerationSettings {
                        chunk_size,
                        ..GenerationSettings::new(IdKind::UuidV4, TOTAL_IDS)
                    };
                    let job = orchestrator.run("bench", settings).await.unwrap();
                    black_box(job);
                }
                start.elapsed()
            });
        });
    }

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let rt = Builder::new_current_thread().enable_all().build().unwrap();
    let settings = GenerationSettings::new(IdKind::Ulid, TOTAL_IDS);
    let job = rt
        .block_on(BatchOrchestrator::new().run("export", settings))
        .unwrap();

    let mut group = c.benchmark_group("export");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    for format in [
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Xml,
        ExportFormat::Text,
    ] {
        group.bench_function(format.as_str(), |b| {
            b.iter(|| black_box(export_job(&job, format).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_generate_raw,
    bench_analyze,
    bench_batch,
    bench_export
);
criterion_main!(benches);
