use criterion::{criterion_group, criterion_main, Criterion};
use transparency_patch_bcn::{decode_surface, BlockFormat};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decode Surface (BCn -> RGBA8888)");

    // 2048x2048px
    let size = 2048u32;

    for format in BlockFormat::all_values() {
        let block_size = format.block_size();
        let input: Vec<u8> = (0..format.compressed_size(size, size))
            .map(|i| ((i / block_size) * (i % block_size) % 255) as u8)
            .collect();

        group.throughput(criterion::Throughput::Bytes(input.len() as u64));
        group.bench_function(format!("decode_surface {format:?}"), |b| {
            b.iter(|| decode_surface(*format, size, size, &input).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
