//! Benchmarks for DEFLATE decoding.
//!
//! Run with: `cargo bench -p sluice-inflate`

use std::io::Write;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flate2::write::DeflateEncoder;
use flate2::Compression;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sluice_inflate::{inflate, Decompressor, InflateDecompressor};

/// Generate test data with varying compressibility.
fn generate_test_data(size: usize, compressibility: f64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut data = Vec::with_capacity(size);

    if compressibility > 0.5 {
        let phrases: &[&[u8]] = &[
            b"The quick brown fox jumps over the lazy dog. ",
            b"Pack my box with five dozen liquor jugs! ",
            b"How vexingly quick daft zebras jump!! ",
        ];
        while data.len() < size {
            if rng.gen_bool(compressibility) {
                let phrase = phrases[rng.gen_range(0..phrases.len())];
                data.extend_from_slice(phrase);
            } else {
                data.push(rng.gen::<u8>());
            }
        }
        data.truncate(size);
    } else {
        data.resize(size, 0);
        rng.fill(&mut data[..]);
    }

    data
}

fn compress(data: &[u8], level: u32) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn bench_inflate_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("inflate_levels");
    let size = 256 * 1024;
    let data = generate_test_data(size, 0.8);

    for level in [0, 1, 6, 9] {
        let compressed = compress(&data, level);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("level_{}", level)),
            &compressed,
            |b, compressed| b.iter(|| inflate(black_box(&compressed[..])).unwrap()),
        );
    }

    group.finish();
}

fn bench_inflate_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("inflate_sizes");
    let decompressor = InflateDecompressor::new();

    for size in [4 * 1024, 64 * 1024, 1024 * 1024] {
        let data = generate_test_data(size, 0.7);
        let compressed = compress(&data, 6);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &compressed, |b, compressed| {
            b.iter(|| decompressor.decompress(black_box(compressed)).unwrap())
        });
    }

    group.finish();
}

fn bench_inflate_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("inflate_random");
    let size = 64 * 1024;
    let data = generate_test_data(size, 0.0);
    let compressed = compress(&data, 6);

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_function("incompressible", |b| {
        b.iter(|| inflate(black_box(&compressed[..])).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_inflate_levels,
    bench_inflate_sizes,
    bench_inflate_random,
);

criterion_main!(benches);
