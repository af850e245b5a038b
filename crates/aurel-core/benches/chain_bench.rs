//! Per-sample cost of the shaping chain.
//!
//! cargo bench -p aurel-core
#![allow(missing_docs)]

use aurel_core::{AudioSettings, Biquad, Effect, SignalChain, high_shelf_coefficients};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

const FS: f32 = 48000.0;
const BLOCKS: [usize; 4] = [64, 256, 512, 1024];

/// Speech-band tone at -6 dBFS.
fn tone(frames: usize) -> Vec<f32> {
    let step = std::f32::consts::TAU * 1000.0 / FS;
    (0..frames).map(|i| 0.5 * (step * i as f32).sin()).collect()
}

fn shelf(c: &mut Criterion) {
    let mut group = c.benchmark_group("shelf");
    let coefficients = high_shelf_coefficients(3000.0, 10.0, FS);

    for frames in BLOCKS {
        let input = tone(frames);
        group.throughput(Throughput::Elements(frames as u64));
        group.bench_with_input(BenchmarkId::new("biquad", frames), &input, |b, input| {
            let mut filter = Biquad::new();
            filter.set(coefficients);
            b.iter(|| input.iter().fold(0.0, |acc, &x| acc + filter.process(black_box(x))));
        });
    }

    group.bench_function("design", |b| {
        b.iter(|| high_shelf_coefficients(black_box(3000.0), black_box(10.0), FS));
    });
    group.finish();
}

fn chain(c: &mut Criterion) {
    let street = AudioSettings::new(70.0, 15.0, 5.0, 0.0).derive();
    let quiet = AudioSettings::new(40.0, 10.0, -5.0, 0.0).derive();
    let mut group = c.benchmark_group("chain");

    for frames in BLOCKS {
        let input = tone(frames);
        group.throughput(Throughput::Elements(frames as u64));

        group.bench_with_input(BenchmarkId::new("steady", frames), &input, |b, input| {
            let mut chain = SignalChain::new(FS, true);
            chain.snap_to_params(&street);
            b.iter(|| {
                for &x in input {
                    black_box(chain.process_stereo(black_box(x), x));
                }
            });
        });

        // Alternating targets keep every stage ramping, including the
        // per-sample shelf redesign.
        group.bench_with_input(BenchmarkId::new("ramping", frames), &input, |b, input| {
            let mut chain = SignalChain::new(FS, true);
            let mut toggle = false;
            b.iter(|| {
                toggle = !toggle;
                chain.set_params(if toggle { &quiet } else { &street });
                for &x in input {
                    black_box(chain.process_stereo(black_box(x), x));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, shelf, chain);
criterion_main!(benches);
