use criterion::{criterion_group, criterion_main, Criterion};
use transparency_patch_alpha::{classify_alpha, normalize_alpha, AlphaPolicy};
use transparency_patch_common::{color_8888::Color8888, surface::Surface};

/// 2048x2048 surface; alpha ramps across each row.
fn make_surface(min_alpha: u8) -> Surface {
    let size = 2048u32;
    let range = 256 - min_alpha as u32;
    let pixels = (0..size * size)
        .map(|i| {
            let a = min_alpha as u32 + (i % size) * range / size;
            Color8888::new((i % 251) as u8, (i % 241) as u8, (i % 239) as u8, a as u8)
        })
        .collect();
    Surface::new(size, size, pixels).unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Alpha Normalization");
    let policy = AlphaPolicy::default();
    let opaque = make_surface(255);
    let flatten = make_surface(128);
    let stretch = make_surface(0);

    group.throughput(criterion::Throughput::Bytes(
        opaque.pixels().len() as u64 * 4,
    ));

    group.bench_function("classify_alpha (opaque)", |b| {
        b.iter(|| classify_alpha(&opaque, &policy))
    });
    group.bench_function("normalize_alpha (flatten)", |b| {
        b.iter(|| normalize_alpha(&flatten, &policy))
    });
    group.bench_function("normalize_alpha (stretch)", |b| {
        b.iter(|| normalize_alpha(&stretch, &policy))
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
