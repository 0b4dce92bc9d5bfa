use hrv_spectral::{welch, yule_walker};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn white_noise(n: usize, sigma: f64, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, sigma).unwrap();
    (0..n).map(|_| normal.sample(&mut rng)).collect()
}

#[test]
fn test_welch_integrates_to_variance() {
    let fs = 4.0;
    let nfft = 2048;
    let x = white_noise(2048, 2.0, 11);
    let psd = welch(&x, fs, nfft).unwrap();

    let df = fs / nfft as f64;
    let total: f64 = psd.iter().sum::<f64>() * df;
    assert!((total - 4.0).abs() / 4.0 < 0.15, "integrated power {total}");
}

#[test]
fn test_ar_model_spectrum_matches_welch_shape() {
    // Low-pass AR(1): power concentrated at low frequencies
    let mut rng = rand::rngs::StdRng::seed_from_u64(3);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut x = vec![0.0; 4096];
    for t in 1..x.len() {
        x[t] = 0.8 * x[t - 1] + normal.sample(&mut rng);
    }

    let model = yule_walker(&x, 1).unwrap();
    let psd = model.psd(256).unwrap();
    let low: f64 = psd[..16].iter().sum();
    let high: f64 = psd[112..128].iter().sum();
    assert!(low > 10.0 * high);
}
