#![allow(
    clippy::tests_outside_test_module,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    reason = "benchmark"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use jadeite::{Compiler, Jinja, Options};

mod utils;

fn compile_benchmark(c: &mut Criterion) {
    let pages = utils::generate_random_pages(100);

    let pretty = Compiler::default();
    let flat = Compiler::new(Options::default().pretty(false)).with_target(Jinja);

    let mut group = c.benchmark_group("Template Compilation");
    group.sample_size(50);

    group.bench_function("compile_pretty_standard", |b| {
        b.iter(|| {
            for page in &pages {
                black_box(pretty.compile(page).unwrap());
            }
        });
    });

    group.bench_function("compile_flat_jinja", |b| {
        b.iter(|| {
            for page in &pages {
                black_box(flat.compile(page).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, compile_benchmark);
criterion_main!(benches);
