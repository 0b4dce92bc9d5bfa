//! Analysis configuration
//!
//! Defaults that calculators, segment mapping and index evaluation consult
//! when a caller does not supply explicit parameters.

use crate::interpolate::InterpolationKind;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Power spectral density estimation methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PsdMethod {
    /// Hamming-windowed periodogram
    Fft,
    /// Welch's averaged periodogram
    #[default]
    Welch,
    /// Lomb-Scargle periodogram of the integrated series
    LombScargle,
    /// Autoregressive model of order 1
    Ar1,
    /// Autoregressive model up to the configured order ceiling
    Ar,
}

impl PsdMethod {
    /// Get the name of this method
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fft => "fft",
            Self::Welch => "welch",
            Self::LombScargle => "lomb_scargle",
            Self::Ar1 => "ar1",
            Self::Ar => "ar",
        }
    }
}

/// A half-open frequency band `[low, high)` in Hz
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBand {
    pub low: f64,
    pub high: f64,
}

impl FrequencyBand {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, freq: f64) -> bool {
        freq >= self.low && freq < self.high
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !(self.low >= 0.0 && self.high > self.low) {
            return Err(Error::InvalidParameter(format!(
                "{name} band [{}, {}) must satisfy 0 <= low < high",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

/// Standard HRV frequency bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bands {
    pub vlf: FrequencyBand,
    pub lf: FrequencyBand,
    pub hf: FrequencyBand,
}

impl Default for Bands {
    fn default() -> Self {
        Self {
            vlf: FrequencyBand::new(0.0, 0.04),
            lf: FrequencyBand::new(0.04, 0.15),
            hf: FrequencyBand::new(0.15, 0.4),
        }
    }
}

/// Parameters shared by every analysis entry point
///
/// Omitted fields take their defaults when deserialized:
///
/// ```
/// use hrv_core::{AnalysisConfig, PsdMethod};
///
/// let config = AnalysisConfig::from_json_str(r#"{ "psd_method": "ar", "ar_max_order": 8 }"#).unwrap();
/// assert_eq!(config.psd_method, PsdMethod::Ar);
/// assert_eq!(config.ar_max_order, 8);
/// assert_eq!(config.histogram_bins, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rate (Hz) irregular series are interpolated to before spectral estimation
    pub interpolation_freq: f64,
    /// Interpolation method used for resampling
    pub interpolation_kind: InterpolationKind,
    /// Subtract the mean before PSD estimation
    pub remove_mean: bool,
    /// Highest autoregressive order tried by the AR PSD
    pub ar_max_order: usize,
    /// Bin count of histogram calculators
    pub histogram_bins: usize,
    /// PSD estimator behind the band-power indexes
    pub psd_method: PsdMethod,
    /// Threshold (ms) of the pNNx and NNx indexes
    pub nnx_threshold: f64,
    /// Frequency band limits
    pub bands: Bands,
    /// Sample entropy tolerance as a fraction of the standard deviation
    pub sample_entropy_tolerance: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            interpolation_freq: 4.0,
            interpolation_kind: InterpolationKind::Cubic,
            remove_mean: true,
            ar_max_order: 16,
            histogram_bins: 100,
            psd_method: PsdMethod::Welch,
            nnx_threshold: 50.0,
            bands: Bands::default(),
            sample_entropy_tolerance: 0.2,
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from JSON and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.interpolation_freq > 0.0 && self.interpolation_freq.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "interpolation_freq must be positive, got {}",
                self.interpolation_freq
            )));
        }
        if self.ar_max_order == 0 {
            return Err(Error::InvalidParameter(
                "ar_max_order must be at least 1".to_string(),
            ));
        }
        if self.histogram_bins == 0 {
            return Err(Error::InvalidParameter(
                "histogram_bins must be at least 1".to_string(),
            ));
        }
        if self.nnx_threshold < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "nnx_threshold must be non-negative, got {}",
                self.nnx_threshold
            )));
        }
        if !(self.sample_entropy_tolerance > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "sample_entropy_tolerance must be positive, got {}",
                self.sample_entropy_tolerance
            )));
        }
        self.bands.vlf.validate("vlf")?;
        self.bands.lf.validate("lf")?;
        self.bands.hf.validate("hf")?;
        Ok(())
    }
}
