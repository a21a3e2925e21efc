//! Performance benchmarks for the spectrum pipeline

use bar_spectrum::{AnalyzerConfig, Complex32, FftEngine, SpectrumProducer};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sine(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 44100.0).sin() * 0.5)
        .collect()
}

fn bench_transform(c: &mut Criterion) {
    for size in [256, 4096, 8192] {
        let engine = FftEngine::new(size).unwrap();
        let window = sine(size);
        let mut out = vec![Complex32::new(0.0, 0.0); size];

        c.bench_function(&format!("fft_{size}"), |b| {
            b.iter(|| engine.process(black_box(&window), &mut out));
        });
    }
}

fn bench_ingest(c: &mut Criterion) {
    // Typical 1024 frame stereo callback into the default 8192 point window
    let (mut producer, _consumer) = SpectrumProducer::new(AnalyzerConfig::default()).unwrap();
    let block: Vec<[f32; 2]> = sine(1024).into_iter().map(|s| [s, s]).collect();

    c.bench_function("ingest_stereo_1024", |b| {
        b.iter(|| producer.ingest_frames(black_box(&block)));
    });
}

criterion_group!(benches, bench_transform, bench_ingest);
criterion_main!(benches);
