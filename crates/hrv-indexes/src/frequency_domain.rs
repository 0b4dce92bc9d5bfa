//! Frequency-domain indexes
//!
//! All of them read the same unnormalized spectrum, estimated with
//! `AnalysisConfig::psd_method`, from the signal's cache.

use crate::index::{Band, Index};
use hrv_calculators::{psd, Spectrum, SpectrumParams};
use hrv_core::{AnalysisConfig, Result};
use hrv_signal::Signal;
use std::sync::Arc;
use tracing::warn;

fn spectrum(signal: &Signal, config: &AnalysisConfig) -> Result<Arc<Spectrum>> {
    let params = SpectrumParams {
        normalize: false,
        ..SpectrumParams::from(config)
    };
    psd(signal, config.psd_method, &params, true)
}

fn band_power(spectrum: &Spectrum, band: Band, config: &AnalysisConfig) -> f64 {
    match band.range(config) {
        Some(range) => spectrum.band_power(range.low, range.high),
        None => spectrum.total_power(),
    }
}

/// Ratio that keeps IEEE semantics for a zero denominator, with a warning
fn ratio(numerator: f64, denominator: f64, what: &str) -> f64 {
    if denominator == 0.0 {
        warn!(numerator, index = what, "zero power in the denominator");
    }
    numerator / denominator
}

/// Absolute power in a band (ms^2 for RR series)
#[derive(Debug, Clone, Copy)]
pub struct BandPower(pub Band);

impl Index for BandPower {
    fn name(&self) -> String {
        self.0.name().to_string()
    }

    fn compute(&self, signal: &Signal, config: &AnalysisConfig) -> Result<f64> {
        Ok(band_power(&*spectrum(signal, config)?, self.0, config))
    }
}

/// Power in a band relative to the total power
#[derive(Debug, Clone, Copy)]
pub struct NormalizedPower(pub Band);

impl Index for NormalizedPower {
    fn name(&self) -> String {
        format!("n{}", self.0.name())
    }

    fn compute(&self, signal: &Signal, config: &AnalysisConfig) -> Result<f64> {
        let spectrum = spectrum(signal, config)?;
        let name = self.name();
        Ok(ratio(
            band_power(&spectrum, self.0, config),
            spectrum.total_power(),
            &name,
        ))
    }
}

/// LF / HF power ratio
#[derive(Debug, Clone, Copy, Default)]
pub struct LfHf;

impl Index for LfHf {
    fn name(&self) -> String {
        "lf_hf".to_string()
    }

    fn compute(&self, signal: &Signal, config: &AnalysisConfig) -> Result<f64> {
        let spectrum = spectrum(signal, config)?;
        let lf = band_power(&spectrum, Band::Lf, config);
        let hf = band_power(&spectrum, Band::Hf, config);
        Ok(ratio(lf, hf, "lf_hf"))
    }
}

/// Shannon entropy of the VLF/LF/HF power distribution
///
/// Normalized by the log of the number of non-empty bands, so it lies in
/// `[0, 1]` when at least two bands carry power. With a single non-empty
/// band the normalization divides by zero and the result is NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectralEntropy;

impl Index for SpectralEntropy {
    fn name(&self) -> String {
        "spectral_entropy".to_string()
    }

    fn compute(&self, signal: &Signal, config: &AnalysisConfig) -> Result<f64> {
        let spectrum = spectrum(signal, config)?;
        let powers =
            [Band::Vlf, Band::Lf, Band::Hf].map(|band| band_power(&spectrum, band, config));
        let total: f64 = powers.iter().sum();

        let shares: Vec<f64> = powers
            .iter()
            .map(|p| ratio(*p, total, "spectral_entropy"))
            .filter(|share| *share > 0.0)
            .collect();
        let entropy: f64 = -shares.iter().map(|s| s * s.ln()).sum::<f64>();
        Ok(ratio(entropy, (shares.len() as f64).ln(), "spectral_entropy"))
    }
}
