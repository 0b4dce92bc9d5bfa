//! Core building blocks for HRV analysis
//!
//! This crate holds the pieces shared by every other hrv-engine crate:
//!
//! - [`Error`] / [`Result`]: the common error taxonomy
//! - [`CalculatorCache`]: the thread-safe, compute-once cache each signal owns
//! - [`AnalysisConfig`]: explicit defaults for calculators and indexes
//! - [`interpolate`]: 1-D interpolation used by resampling and spectral gridding
//! - [`math`]: small numeric helpers

pub mod cache;
pub mod config;
pub mod error;
pub mod interpolate;
pub mod math;

pub use cache::{CacheKey, CacheStats, CalculatorCache};
pub use config::{AnalysisConfig, Bands, FrequencyBand, PsdMethod};
pub use error::{Error, Result};
pub use interpolate::{interpolate_to_rate, InterpolationKind, Interpolator};
