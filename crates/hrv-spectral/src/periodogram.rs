//! FFT periodogram and Welch's averaged periodogram

use crate::window::hann_periodic;
use hrv_core::math::mean;
use hrv_core::{Error, Result};
use num_complex::Complex;
use rustfft::FftPlanner;
use tracing::debug;

/// Forward FFT of a real sequence, zero-padded (or truncated) to `nfft`
pub(crate) fn real_fft(x: &[f64], nfft: usize) -> Vec<Complex<f64>> {
    let mut buffer: Vec<Complex<f64>> = x
        .iter()
        .take(nfft)
        .map(|&v| Complex::new(v, 0.0))
        .collect();
    buffer.resize(nfft, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(nfft);
    fft.process(&mut buffer);
    buffer
}

/// Squared DFT magnitudes of `frame`, non-negative half only
///
/// Returns the first `ceil(n / 2)` bins.
pub fn power_spectrum(frame: &[f64]) -> Vec<f64> {
    let n = frame.len();
    if n == 0 {
        return Vec::new();
    }
    real_fft(frame, n)
        .iter()
        .take(n.div_ceil(2))
        .map(|c| c.norm_sqr())
        .collect()
}

/// Welch power spectral density estimate
///
/// Hann-windowed segments of `min(256, n)` samples with 50% overlap, each
/// detrended by its mean and zero-padded to `nfft`. Densities are one-sided
/// and scaled by `1 / (fs * sum(w^2))`; the result has `nfft / 2 + 1` bins.
pub fn welch(x: &[f64], fs: f64, nfft: usize) -> Result<Vec<f64>> {
    let n = x.len();
    if n < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: n,
        });
    }
    if !(fs > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "sampling frequency must be positive, got {fs}"
        )));
    }

    let segment_len = n.min(256);
    if nfft < segment_len {
        return Err(Error::InvalidParameter(format!(
            "nfft ({nfft}) must not be shorter than the segment length ({segment_len})"
        )));
    }
    let overlap = segment_len / 2;
    let step = segment_len - overlap;
    let segments = (n - overlap) / step;
    debug!(n, nfft, segment_len, segments, "welch periodogram");

    let window = hann_periodic(segment_len);
    let scale = 1.0 / (fs * window.iter().map(|w| w * w).sum::<f64>());
    let bins = nfft / 2 + 1;
    let mut psd = vec![0.0; bins];

    for s in 0..segments {
        let segment = &x[s * step..s * step + segment_len];
        let offset = mean(segment);
        let tapered: Vec<f64> = segment
            .iter()
            .zip(&window)
            .map(|(v, w)| (v - offset) * w)
            .collect();
        for (acc, c) in psd.iter_mut().zip(real_fft(&tapered, nfft).iter()) {
            *acc += c.norm_sqr() * scale;
        }
    }

    // Fold negative frequencies; the Nyquist bin of an even nfft has no twin
    let fold_end = if nfft % 2 == 0 { bins - 1 } else { bins };
    for value in psd.iter_mut().take(fold_end).skip(1) {
        *value *= 2.0;
    }
    for value in psd.iter_mut() {
        *value /= segments as f64;
    }
    Ok(psd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_power_spectrum_length() {
        assert_eq!(power_spectrum(&[1.0; 64]).len(), 32);
        assert_eq!(power_spectrum(&[1.0; 65]).len(), 33);
        assert!(power_spectrum(&[]).is_empty());
    }

    #[test]
    fn test_power_spectrum_of_pure_tone() {
        let n = 64;
        let tone: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 8.0 * i as f64 / n as f64).cos())
            .collect();
        let power = power_spectrum(&tone);
        let peak = power
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 8);
        assert_relative_eq!(power[8], (n as f64 / 2.0).powi(2), epsilon = 1e-6);
    }

    #[test]
    fn test_welch_bin_count_and_peak() {
        let fs = 4.0;
        let signal: Vec<f64> = (0..512)
            .map(|i| (2.0 * PI * 0.25 * i as f64 / fs).sin())
            .collect();
        let psd = welch(&signal, fs, 512).unwrap();
        assert_eq!(psd.len(), 257);

        let peak = psd
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        let peak_freq = peak as f64 * fs / 512.0;
        assert!((peak_freq - 0.25).abs() < 0.02, "peak at {peak_freq}");
    }

    #[test]
    fn test_welch_rejects_bad_input() {
        assert!(welch(&[1.0], 4.0, 128).is_err());
        assert!(welch(&[1.0, 2.0, 3.0], 0.0, 128).is_err());
        assert!(welch(&vec![0.0; 300], 4.0, 128).is_err());
    }
}
