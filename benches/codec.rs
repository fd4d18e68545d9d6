use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qr_codec::{decode, encode, ECLevel, EncodeOptions};

fn bench_encode_small(c: &mut Criterion) {
    let opts = EncodeOptions::default();
    c.bench_function("encode_v1_numeric", |b| {
        b.iter(|| encode(black_box("01234567"), black_box(&opts)))
    });
}

fn bench_encode_medium(c: &mut Criterion) {
    let input: String = (0..500).map(|i| ((i % 26) as u8 + b'A') as char).collect();
    let opts = EncodeOptions {
        ec_level: ECLevel::Q,
        ..Default::default()
    };
    c.bench_function("encode_500_chars_q", |b| {
        b.iter(|| encode(black_box(&input), black_box(&opts)))
    });
}

fn bench_decode_small(c: &mut Criterion) {
    let symbols = encode("01234567", &EncodeOptions::default()).unwrap();
    c.bench_function("decode_v1_numeric", |b| {
        b.iter(|| decode(black_box(&symbols[0].matrix)))
    });
}

fn bench_decode_medium(c: &mut Criterion) {
    let input: String = (0..500).map(|i| ((i % 26) as u8 + b'A') as char).collect();
    let symbols = encode(&input, &EncodeOptions::default()).unwrap();
    c.bench_function("decode_500_chars", |b| {
        b.iter(|| decode(black_box(&symbols[0].matrix)))
    });
}

criterion_group!(
    benches,
    bench_encode_small,
    bench_encode_medium,
    bench_decode_small,
    bench_decode_medium
);
criterion_main!(benches);
