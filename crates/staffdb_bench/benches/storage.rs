//! Whole-database read and write benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use staffdb_bench::{generate_employees, header_for, populated_backend};
use staffdb_core::{output_file, read_employees, validate_header, Config, Database, RECORD_SIZE};
use staffdb_storage::{FileBackend, InMemoryBackend};
use tempfile::TempDir;

/// Benchmark full rewrites into memory.
fn bench_inmemory_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("inmemory_write");

    for count in [1usize, 100, 1000, 10_000].iter() {
        group.throughput(Throughput::Bytes((*count * RECORD_SIZE) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let employees = generate_employees(count);
            let header = header_for(count);
            let mut backend = InMemoryBackend::new();

            b.iter(|| {
                output_file(&mut backend, black_box(&header), black_box(&employees)).unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark validate + read-all from memory.
fn bench_inmemory_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("inmemory_read");

    for count in [1usize, 100, 1000, 10_000].iter() {
        group.throughput(Throughput::Bytes((*count * RECORD_SIZE) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let mut backend = populated_backend(count);

            b.iter(|| {
                let header = validate_header(&mut backend).unwrap();
                black_box(read_employees(&mut backend, &header).unwrap());
            });
        });
    }

    group.finish();
}

/// Benchmark append + persist against a real file.
fn bench_file_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_append");

    // Use larger sample size for file operations
    group.sample_size(50);

    group.bench_function("append_persist", |b| {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bench.db");
        let config = Config::default().sync_on_write(false);
        let mut db = Database::create(&path, config.clone()).unwrap();

        b.iter(|| {
            // Keep rewrites a bounded size.
            if db.header().count == 1000 {
                db = Database::create_with_backend(FileBackend::open(&path).unwrap(), config.clone())
                    .unwrap();
            }
            db.append(black_box("Ada,Main St,40")).unwrap();
            db.persist().unwrap();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_inmemory_write,
    bench_inmemory_read,
    bench_file_append
);
criterion_main!(benches);
