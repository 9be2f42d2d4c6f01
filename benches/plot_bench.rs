//! Benchmarks for the PCA projection and PNG rendering.

use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use lexapprox_core::EmbeddingSpace;
use lexapprox_plot::SpaceProjection;
use lexapprox_plot::render_space_plot;
use std::hint::black_box;
use std::time::Duration;

fn space(n: usize, dimension: usize) -> EmbeddingSpace {
    let entries = (0..n).map(|i| {
        let vector = (0..dimension)
            .map(|d| ((i * 31 + d * 17) % 97) as f32 / 97.0 - 0.5)
            .collect();
        (format!("item_{i}"), vector)
    });
    EmbeddingSpace::from_entries(entries).unwrap()
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    group.measurement_time(Duration::from_secs(10));
    let space = space(2_000, 256);
    group.bench_function("fit_2000x256", |b| {
        b.iter(|| black_box(SpaceProjection::fit(&space).unwrap()));
    });
    group.finish();
}

fn bench_space_plot(c: &mut Criterion) {
    let space = space(2_000, 64);
    let projection = SpaceProjection::fit(&space).unwrap();
    let round: Vec<String> = (0..12).map(|i| format!("item_{i}")).collect();
    c.bench_function("render_space_plot", |b| {
        b.iter(|| black_box(render_space_plot(&projection, &round, Some("item_3")).unwrap()));
    });
}

criterion_group!(benches, bench_projection, bench_space_plot);
criterion_main!(benches);
