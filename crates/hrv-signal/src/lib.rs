//! Signals and the cached calculator protocol
//!
//! - [`Signal`]: evenly or unevenly sampled series with segmentation and
//!   resampling
//! - [`filters`]: normalization and differencing
//! - [`Calculator`] / [`DataSource`]: named computations cached per signal
//!
//! ```rust
//! use hrv_signal::Signal;
//! use hrv_core::InterpolationKind;
//!
//! let ecg = Signal::evenly(vec![0.0; 1000], 1000.0, "ECG", 0.0).unwrap();
//! let decimated = ecg.resample(100.0, InterpolationKind::Linear).unwrap();
//! assert_eq!(decimated.len(), 100);
//!
//! let first_half = ecg.segment_by_time(0.0, Some(0.5));
//! assert_eq!(first_half.len(), 500);
//! ```

pub mod calculator;
pub mod filters;
pub mod signal;

pub use calculator::{Calculator, DataSource};
pub use filters::{Diff, Filter, Normalize};
pub use signal::{Signal, TimeBase, XValues, RR_TIME_RESOLUTION_HZ};
