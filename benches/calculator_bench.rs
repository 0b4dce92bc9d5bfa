use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hrv_engine::calculators::{
    HistogramCalc, HistogramParams, PsdAr, PsdFft, PsdLombScargle, PsdWelch, SpectrumParams,
};
use hrv_engine::prelude::*;
use rand::prelude::*;
use rand_distr::Normal;

/// Generate RR intervals in ms with a respiratory component
fn generate_rr(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 20.0).unwrap();
    (0..size)
        .map(|i| 850.0 + 40.0 * (i as f64 * 0.3).sin() + noise.sample(&mut rng))
        .collect()
}

fn bench_psd_estimators(c: &mut Criterion) {
    let mut group = c.benchmark_group("psd");
    let params = SpectrumParams::default();

    for &size in &[128, 512, 2048] {
        let signal = Signal::from_rr_intervals(generate_rr(size, 42)).unwrap();

        group.bench_with_input(BenchmarkId::new("fft", size), &signal, |b, s| {
            b.iter(|| PsdFft.get(black_box(s), &params, false))
        });
        group.bench_with_input(BenchmarkId::new("welch", size), &signal, |b, s| {
            b.iter(|| PsdWelch.get(black_box(s), &params, false))
        });
        group.bench_with_input(BenchmarkId::new("lomb_scargle", size), &signal, |b, s| {
            b.iter(|| PsdLombScargle.get(black_box(s), &params, false))
        });
        group.bench_with_input(BenchmarkId::new("ar", size), &signal, |b, s| {
            b.iter(|| PsdAr.get(black_box(s), &params, false))
        });
    }

    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache");
    let signal = Signal::from_rr_intervals(generate_rr(2048, 7)).unwrap();
    let params = SpectrumParams::default();
    PsdWelch.get(&signal, &params, true).unwrap();

    group.bench_function("welch_hit", |b| {
        b.iter(|| PsdWelch.get(black_box(&signal), &params, true))
    });
    group.bench_function("histogram_miss", |b| {
        b.iter(|| HistogramCalc.get(black_box(&signal), &HistogramParams::default(), false))
    });

    group.finish();
}

criterion_group!(benches, bench_psd_estimators, bench_cache);
criterion_main!(benches);
