//! Criterion benchmarks for remote_console

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use remote_console::appenders::console::format_line;
use remote_console::prelude::*;
use std::io;

const FULL_PAYLOAD: &[u8] = br#"{"timestamp":"2024-01-02T03:04:05.678Z","logLevel":"error","tag":"net","message":"connection lost"}"#;

// ============================================================================
// Decoding Benchmarks
// ============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(1));
    let decoder = Decoder::new();

    group.bench_function("full_payload", |b| {
        b.iter(|| decoder.decode(black_box(FULL_PAYLOAD)))
    });

    group.bench_function("empty_object", |b| {
        b.iter(|| decoder.decode(black_box(b"{}")))
    });

    group.bench_function("wrong_types", |b| {
        b.iter(|| {
            decoder.decode(black_box(
                br#"{"timestamp":1,"logLevel":[2],"tag":{"a":3},"message":false}"#,
            ))
        })
    });

    group.bench_function("malformed", |b| {
        b.iter(|| decoder.decode(black_box(b"not-json")))
    });

    group.finish();
}

// ============================================================================
// Rendering Benchmarks
// ============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.throughput(Throughput::Elements(1));

    let record = Decoder::new().decode(FULL_PAYLOAD).unwrap();
    let console = ConsoleAppender::with_sink(io::sink(), true);

    group.bench_function("format_line", |b| {
        b.iter(|| format_line(black_box(&record)))
    });

    group.bench_function("render_colored", |b| {
        b.iter(|| console.render(black_box(&record)))
    });

    group.finish();
}

criterion_group!(benches, bench_decode, bench_render);
criterion_main!(benches);
