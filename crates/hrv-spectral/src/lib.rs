//! # Spectral estimators for HRV analysis
//!
//! FFT-based building blocks used by the power spectral density calculators:
//!
//! - [`window`]: Hamming and Hann tapers
//! - [`periodogram`]: squared-magnitude FFT spectrum and Welch's method
//! - [`lomb`]: Lomb-Scargle periodogram for irregular sampling
//! - [`ar`]: Yule-Walker AR fitting and AR model spectra
//!
//! ```rust
//! use hrv_spectral::{hamming, power_spectrum};
//!
//! let signal: Vec<f64> = (0..64).map(|i| (i as f64 * 0.3).sin()).collect();
//! let window = hamming(signal.len());
//! let frame: Vec<f64> = signal.iter().zip(&window).map(|(x, w)| x * w).collect();
//! let power = power_spectrum(&frame);
//! assert_eq!(power.len(), 32);
//! ```

pub mod ar;
pub mod lomb;
pub mod periodogram;
pub mod window;

pub use ar::{autocorrelation_biased, yule_walker, ArModel};
pub use lomb::lomb_scargle;
pub use periodogram::{power_spectrum, welch};
pub use window::{hamming, hann_periodic};
