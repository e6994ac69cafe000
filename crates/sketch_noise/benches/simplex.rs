use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sketch_noise::Noise;
use sketch_random::Generator;
use std::hint::black_box;

fn bench_construction(c: &mut Criterion) {
    c.bench_function("noise_from_seed", |b| {
        b.iter(|| black_box(Noise::new(&mut Generator::new(black_box(42)).unwrap())))
    });
}

fn bench_sample(c: &mut Criterion) {
    let noise = Noise::from_seed(42).unwrap();
    let mut group = c.benchmark_group("noise_sample");
    group.bench_function("2d", |b| {
        b.iter(|| black_box(noise.noise2(black_box(12.3), black_box(-4.56))))
    });
    group.bench_function("3d", |b| {
        b.iter(|| black_box(noise.noise3(black_box(12.3), black_box(-4.56), black_box(7.89))))
    });
    group.bench_function("4d", |b| {
        b.iter(|| {
            black_box(noise.noise4(
                black_box(12.3),
                black_box(-4.56),
                black_box(7.89),
                black_box(0.12),
            ))
        })
    });
    group.finish();
}

fn bench_octaves(c: &mut Criterion) {
    let mut group = c.benchmark_group("noise_octaves_2d");
    for octaves in [1u32, 4, 8] {
        let mut noise = Noise::from_seed(42).unwrap();
        noise.set_detail(octaves, 0.5).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(octaves), &noise, |b, noise| {
            b.iter(|| black_box(noise.noise2(black_box(12.3), black_box(-4.56))))
        });
    }
    group.finish();
}

fn bench_grid(c: &mut Criterion) {
    let noise = Noise::from_seed(42).unwrap();
    c.bench_function("noise_grid_64x64", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for y in 0..64 {
                for x in 0..64 {
                    sum += noise.noise2(x as f64 * 0.05, y as f64 * 0.05).unwrap();
                }
            }
            black_box(sum)
        })
    });
}

criterion_group!(benches, bench_construction, bench_sample, bench_octaves, bench_grid);
criterion_main!(benches);
