//! # Cached HRV calculators
//!
//! Concrete [`Calculator`](hrv_signal::Calculator) implementations. Each one
//! is a stateless unit struct; results are cached on the signal they are
//! requested for.
//!
//! | calculator | cache name | output |
//! |---|---|---|
//! | [`FftSpectrum`] | `fft_spectrum` | [`Spectrum`] |
//! | [`PsdFft`], [`PsdWelch`], [`PsdLombScargle`], [`PsdAr1`], [`PsdAr`] | `psd_*` | [`Spectrum`] |
//! | [`HistogramCalc`] | `histogram` | [`Histogram`](hrv_histogram::Histogram) |
//! | [`HistogramMax`] | `histogram_max` | [`HistogramPeak`](hrv_histogram::HistogramPeak) |
//! | [`FirstDifference`] | `diff` | `Vec<f64>` |
//! | [`StandardDeviation`] | `standard_deviation` | `f64` |
//! | [`OrderedSubsets`] | `ordered_subsets` | `Vec<Vec<f64>>` |
//! | [`Poincare`] | `poincare_sd` | [`PoincareSd`] |
//!
//! ```rust
//! use hrv_calculators::{PsdWelch, SpectrumParams};
//! use hrv_signal::{Calculator, Signal};
//!
//! let rr: Vec<f64> = (0..300).map(|i| 800.0 + 30.0 * (i as f64 * 0.5).sin()).collect();
//! let signal = Signal::from_rr_intervals(rr).unwrap();
//! let params = SpectrumParams::default();
//!
//! let first = PsdWelch.get(&signal, &params, true).unwrap();
//! let second = PsdWelch.get(&signal, &params, true).unwrap();
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//! ```

pub mod histogram;
pub mod psd;
pub mod spectrum;
pub mod statistics;

pub use histogram::{HistogramCalc, HistogramMax, HistogramParams};
pub use psd::{psd, FftSpectrum, PsdAr, PsdAr1, PsdFft, PsdLombScargle, PsdWelch};
pub use spectrum::{Spectrum, SpectrumParams};
pub use statistics::{FirstDifference, OrderedSubsets, Poincare, PoincareSd, StandardDeviation};
