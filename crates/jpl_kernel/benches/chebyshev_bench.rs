use criterion::{Criterion, black_box, criterion_group, criterion_main};
use jpl_kernel::chebyshev::{series_value, series_value_and_slope};

fn chebyshev_bench(c: &mut Criterion) {
    // de421 Moon records carry 13 coefficients per axis.
    let coeffs: Vec<f64> = (0..13).map(|k| 1.0e5 / (k as f64 + 1.0).powi(3)).collect();

    let mut group = c.benchmark_group("chebyshev");
    group.bench_function("series_value_13", |b| {
        b.iter(|| series_value(black_box(&coeffs), black_box(0.37)))
    });
    group.bench_function("series_value_and_slope_13", |b| {
        b.iter(|| series_value_and_slope(black_box(&coeffs), black_box(0.37)))
    });
    group.finish();
}

criterion_group!(benches, chebyshev_bench);
criterion_main!(benches);
