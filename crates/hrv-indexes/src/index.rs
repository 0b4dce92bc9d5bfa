//! Index protocol

use hrv_core::{AnalysisConfig, FrequencyBand, Result};
use hrv_signal::Signal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar HRV index computed from a signal
///
/// Implementations read intermediate results through the signal's
/// calculator cache, so indexes evaluated on the same signal share work.
pub trait Index: Send + Sync {
    /// Column label
    fn name(&self) -> String;

    fn compute(&self, signal: &Signal, config: &AnalysisConfig) -> Result<f64>;
}

/// Spectral bands of the frequency-domain indexes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Vlf,
    Lf,
    Hf,
    /// Every bin of the spectrum
    Total,
}

impl Band {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vlf => "vlf",
            Self::Lf => "lf",
            Self::Hf => "hf",
            Self::Total => "total",
        }
    }

    /// Frequency range from the configuration; `None` for [`Band::Total`]
    pub fn range(&self, config: &AnalysisConfig) -> Option<FrequencyBand> {
        match self {
            Self::Vlf => Some(config.bands.vlf),
            Self::Lf => Some(config.bands.lf),
            Self::Hf => Some(config.bands.hf),
            Self::Total => None,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
