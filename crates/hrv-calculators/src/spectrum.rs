//! Spectrum result type and the parameters shared by spectral calculators

use hrv_core::{AnalysisConfig, Error, InterpolationKind, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Parameters of the spectral calculators
///
/// Build from an [`AnalysisConfig`] and override single fields with struct
/// update syntax:
///
/// ```
/// use hrv_calculators::SpectrumParams;
/// use hrv_core::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// let raw = SpectrumParams { normalize: false, ..SpectrumParams::from(&config) };
/// assert_eq!(raw.interpolation_freq, 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumParams {
    pub interpolation_freq: f64,
    pub interpolation_kind: InterpolationKind,
    pub remove_mean: bool,
    pub ar_max_order: usize,
    /// Scale PSD powers to a unit maximum
    pub normalize: bool,
}

impl From<&AnalysisConfig> for SpectrumParams {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            interpolation_freq: config.interpolation_freq,
            interpolation_kind: config.interpolation_kind,
            remove_mean: config.remove_mean,
            ar_max_order: config.ar_max_order,
            normalize: true,
        }
    }
}

impl Default for SpectrumParams {
    fn default() -> Self {
        Self::from(&AnalysisConfig::default())
    }
}

/// Power over linearly spaced frequency bins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// Bin frequencies in Hz
    pub bands: Vec<f64>,
    pub powers: Vec<f64>,
    /// Mean of the unnormalized powers
    pub average_power: f64,
    /// Whether `powers` were scaled to a unit maximum
    pub normalized: bool,
}

impl Spectrum {
    /// Wrap raw powers, scaling them to a unit maximum when `normalize` is set
    ///
    /// An all-zero spectrum cannot be scaled and is kept as is.
    pub fn from_raw(bands: Vec<f64>, powers: Vec<f64>, normalize: bool) -> Result<Self> {
        if bands.len() != powers.len() {
            return Err(Error::size_mismatch(bands.len(), powers.len(), "spectrum bins"));
        }
        if powers.is_empty() {
            return Err(Error::empty_input("spectrum"));
        }
        if powers.iter().any(|p| !p.is_finite()) {
            return Err(Error::non_finite("spectrum powers"));
        }

        let average_power = powers.iter().sum::<f64>() / powers.len() as f64;
        let peak = powers.iter().copied().fold(0.0, f64::max);
        let (powers, normalized) = if !normalize {
            (powers, false)
        } else if peak > 0.0 {
            (powers.iter().map(|p| p / peak).collect(), true)
        } else {
            warn!(bins = powers.len(), "spectrum has no power, skipping normalization");
            (powers, false)
        };

        Ok(Self {
            bands,
            powers,
            average_power,
            normalized,
        })
    }

    pub fn len(&self) -> usize {
        self.powers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    /// Spacing of the frequency bins
    pub fn resolution(&self) -> f64 {
        match self.bands.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    fn in_band(&self, low: f64, high: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.bands
            .iter()
            .copied()
            .zip(self.powers.iter().copied())
            .filter(move |(f, _)| *f >= low && *f < high)
    }

    /// Rectangle-rule integral of the powers over `[low, high)`
    pub fn band_power(&self, low: f64, high: f64) -> f64 {
        self.in_band(low, high).map(|(_, p)| p).sum::<f64>() * self.resolution()
    }

    /// Frequency of the largest power inside `[low, high)`
    pub fn peak_frequency(&self, low: f64, high: f64) -> Option<f64> {
        self.in_band(low, high)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(f, _)| f)
    }

    /// Rectangle-rule integral over every bin
    pub fn total_power(&self) -> f64 {
        self.powers.iter().sum::<f64>() * self.resolution()
    }
}
