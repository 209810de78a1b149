//! Throughput of the encode, decode and crc hot paths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use yenc_core::crc::CrcEngine;
use yenc_core::decode::{Decoder, DecoderState};
use yenc_core::encode::{Encoder, EncoderConfig};
use yenc_core::kernel::KernelContext;

const SIZES: [usize; 3] = [4 * 1024, 64 * 1024, 716_800];

/// Deterministic pseudo-random payload.
fn payload(len: usize) -> Vec<u8> {
    let mut x = 0x2545_F491u32;
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            x as u8
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let encoder = Encoder::new(&KernelContext::detect(), EncoderConfig::default());
    let mut group = c.benchmark_group("yenc_encode");
    for size in SIZES {
        let data = payload(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            let mut out = Vec::with_capacity(encoder.max_length(data.len()));
            b.iter(|| {
                out.clear();
                black_box(encoder.encode_into(data, &mut out, 0, true))
            });
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let ctx = KernelContext::detect();
    let encoder = Encoder::new(&ctx, EncoderConfig::default());
    let decoder = Decoder::new(&ctx);
    let mut group = c.benchmark_group("yenc_decode");
    for size in SIZES {
        let encoded = encoder.encode(&payload(size), 0, true).data;
        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::new("bounded", size), &encoded, |b, enc| {
            b.iter(|| black_box(decoder.decode(enc, false, DecoderState::Crlf)));
        });
        group.bench_with_input(BenchmarkId::new("incremental", size), &encoded, |b, enc| {
            b.iter(|| black_box(decoder.decode_incremental(enc, DecoderState::Crlf)));
        });
    }
    group.finish();
}

fn bench_crc(c: &mut Criterion) {
    let table = CrcEngine::new(&KernelContext::generic());
    let detected = CrcEngine::new(&KernelContext::detect());
    let mut group = c.benchmark_group("crc32");
    for size in SIZES {
        let data = payload(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("table", size), &data, |b, d| {
            b.iter(|| black_box(table.crc(d, 0)));
        });
        group.bench_with_input(BenchmarkId::new(detected.kernel().to_string(), size), &data, |b, d| {
            b.iter(|| black_box(detected.crc(d, 0)));
        });
    }
    group.bench_function("combine_716800", |b| {
        b.iter(|| black_box(table.combine(black_box(0x1234_5678), black_box(0x9abc_def0), 716_800)));
    });
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_crc);
criterion_main!(benches);
