use bilateral_blur::KernelWeights;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

pub fn kernel_weights(c: &mut Criterion) {
    let mut group = c.benchmark_group("gaussian");
    for width in [3u32, 5, 9, 15] {
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            b.iter(|| KernelWeights::gaussian(black_box(width), black_box(2.5)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, kernel_weights);
criterion_main!(benches);
