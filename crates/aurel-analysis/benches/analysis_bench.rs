//! Cost of one meter refresh.
//!
//! cargo bench -p aurel-analysis
#![allow(missing_docs)]

use aurel_analysis::{AnalyzerConfig, Fft, SpectralAnalyzer, Window, band_levels};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rustfft::num_complex::Complex;
use std::hint::black_box;

/// Two voices an octave apart plus a little hiss-like ripple.
fn program(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let t = i as f32 / 48000.0;
            let tau = std::f32::consts::TAU;
            0.4 * (tau * 220.0 * t).sin()
                + 0.2 * (tau * 440.0 * t).sin()
                + 0.05 * (tau * 7000.0 * t).sin()
        })
        .collect()
}

fn transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft");
    for len in [256, 1024, 2048] {
        let input = program(len);
        let mut fft = Fft::new(len);
        let mut out = vec![Complex::default(); len];
        group.bench_with_input(BenchmarkId::from_parameter(len), &input, |b, input| {
            b.iter(|| fft.forward_into(black_box(input), &mut out));
        });
    }
    group.finish();

    let frame = program(256);
    c.bench_function("window/blackman/256", |b| {
        b.iter_batched(
            || frame.clone(),
            |mut frame| {
                Window::Blackman.apply(&mut frame);
                frame
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

fn refresh(c: &mut Criterion) {
    // 800 samples is one 60 Hz refresh at 48 kHz.
    let block = program(800);
    let mut group = c.benchmark_group("refresh");
    for fft_size in [256, 1024] {
        let mut analyzer = SpectralAnalyzer::new(AnalyzerConfig {
            fft_size,
            ..AnalyzerConfig::default()
        });
        group.bench_with_input(BenchmarkId::from_parameter(fft_size), &block, |b, block| {
            b.iter(|| {
                analyzer.push_samples(block);
                analyzer.tick()
            });
        });
    }
    group.finish();

    let bytes: Vec<u8> = (0..128u32).map(|i| (i * 2) as u8).collect();
    c.bench_function("bands/128", |b| b.iter(|| band_levels(black_box(&bytes))));
}

criterion_group!(benches, transform, refresh);
criterion_main!(benches);
