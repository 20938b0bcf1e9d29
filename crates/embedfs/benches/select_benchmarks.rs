//! Benchmarks for filesystem selection and embedded reads.
//!
//! # Run Benchmarks
//!
//! ```bash
//! cargo bench --bench select_benchmarks
//! ```

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use embedfs::{EmbeddedFs, FixedExecutable, ReadOnlyFs, Selector};
use std::hint::black_box;
use std::path::Path;

/// Create an embedded tree with the specified number of files spread over
/// ten directories
fn create_embedded_with_files(count: usize) -> EmbeddedFs {
    let files = (0..count).map(|i| {
        (
            format!("assets/dir_{}/file_{i}.txt", i % 10),
            format!("content {i}").into_bytes(),
        )
    });
    EmbeddedFs::builder().add_files(files).build().unwrap()
}

/// Benchmark selecting an embedded subdirectory across tree sizes
fn bench_select_embedded(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_embedded");
    let selector = Selector::with_locator(FixedExecutable::new("/usr/local/bin/myapp"));

    for size in [10, 100, 1000, 10000] {
        let embedded = create_embedded_with_files(size);

        group.bench_with_input(BenchmarkId::new("select", size), &embedded, |b, embedded| {
            b.iter(|| {
                selector
                    .select(Some(embedded), black_box("assets/dir_5"))
                    .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark reads through a re-rooted handle
fn bench_read_rerooted(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_rerooted");

    for size in [10, 100, 1000, 10000] {
        let embedded = create_embedded_with_files(size);
        let fsys = embedded.sub("assets/dir_5").unwrap();
        let name = format!("file_{}.txt", (size / 2 / 10) * 10 + 5);

        group.bench_with_input(BenchmarkId::new("read", size), &name, |b, name| {
            b.iter(|| fsys.read(Path::new(black_box(name))).unwrap());
        });
    }

    group.finish();
}

/// Benchmark missing-directory detection
fn bench_not_found(c: &mut Criterion) {
    let embedded = create_embedded_with_files(1000);

    c.bench_function("stat_missing_dir", |b| {
        b.iter(|| embedded.stat(black_box("assets/missing")).unwrap_err());
    });
}

criterion_group!(
    benches,
    bench_select_embedded,
    bench_read_rerooted,
    bench_not_found
);
criterion_main!(benches);
