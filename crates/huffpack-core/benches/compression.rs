//! Compression benchmarks for HuffPack

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use huffpack_core::{compress, decompress};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

fn sample_text() -> Vec<u8> {
    "It was the best of times, it was the worst of times, it was the age of wisdom, \
     it was the age of foolishness, it was the epoch of belief. "
        .repeat(512)
        .into_bytes()
}

fn sample_random() -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut data = vec![0u8; 256 * 1024];
    rng.fill_bytes(&mut data);
    data
}

fn sample_skewed() -> Vec<u8> {
    (0..256 * 1024u32)
        .map(|i| match i % 16 {
            0..=7 => b'a',
            8..=11 => b'b',
            12 | 13 => b'c',
            14 => b'd',
            _ => (i % 251) as u8,
        })
        .collect()
}

fn bench_compress(c: &mut Criterion, name: &str, data: &[u8]) {
    let mut group = c.benchmark_group(format!("compress_{name}"));
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("huffpack", |b| b.iter(|| compress(black_box(data))));

    // Compare with gzip
    group.bench_function("gzip", |b| {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        b.iter(|| {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(black_box(data)).unwrap();
            encoder.finish()
        })
    });

    // Compare with zstd
    group.bench_function("zstd", |b| b.iter(|| zstd::encode_all(black_box(data), 3)));

    group.finish();
}

fn bench_decompress(c: &mut Criterion, name: &str, data: &[u8]) {
    let packed = compress(data);
    let mut group = c.benchmark_group(format!("decompress_{name}"));
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("huffpack", |b| b.iter(|| decompress(black_box(&packed))));

    group.finish();
}

fn bench_text(c: &mut Criterion) {
    let data = sample_text();
    bench_compress(c, "text", &data);
    bench_decompress(c, "text", &data);
}

fn bench_random(c: &mut Criterion) {
    let data = sample_random();
    bench_compress(c, "random", &data);
    bench_decompress(c, "random", &data);
}

fn bench_skewed(c: &mut Criterion) {
    let data = sample_skewed();
    bench_compress(c, "skewed", &data);
    bench_decompress(c, "skewed", &data);
}

criterion_group!(benches, bench_text, bench_random, bench_skewed);

criterion_main!(benches);
