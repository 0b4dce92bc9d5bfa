//! # hrv-engine
//!
//! Heart rate variability analysis built from small crates:
//!
//! - [`common`]: errors, the calculator cache, configuration, interpolation
//! - [`signal`]: evenly and unevenly sampled signals and the calculator protocol
//! - [`spectral`]: windows, periodograms, Lomb-Scargle and AR estimation
//! - [`histogram`]: fixed-bin histograms
//! - [`calculators`]: the cached calculators
//! - [`segmentation`]: segment generators
//! - [`indexes`]: the index catalogue and per-segment evaluation
//!
//! ```rust
//! use hrv_engine::prelude::*;
//! use std::sync::Arc;
//!
//! let rr: Vec<f64> = (0..400).map(|i| 800.0 + 25.0 * (i as f64 * 0.5).sin()).collect();
//! let signal = Arc::new(Signal::from_rr_intervals(rr).unwrap());
//!
//! let mapper = SegmentMapper::new(standard_indexes(), AnalysisConfig::default()).unwrap();
//! let table = mapper.map(&mut LengthSegments::new(100).unwrap(), signal).unwrap();
//! assert_eq!(table.len(), 4);
//! ```

pub use hrv_calculators as calculators;
pub use hrv_core as common;
pub use hrv_histogram as histogram;
pub use hrv_indexes as indexes;
pub use hrv_segmentation as segmentation;
pub use hrv_signal as signal;
pub use hrv_spectral as spectral;

/// The types most analyses need
pub mod prelude {
    pub use hrv_calculators::{psd, Spectrum, SpectrumParams};
    pub use hrv_core::{AnalysisConfig, Error, InterpolationKind, PsdMethod, Result};
    pub use hrv_indexes::{standard_indexes, Index, SegmentMapper, SegmentTable};
    pub use hrv_segmentation::{
        EventMarkers, ExistingSegments, FromEventsSegments, LengthSegments, SegmentGenerator,
        TimeSegments,
    };
    pub use hrv_signal::{Calculator, DataSource, Signal};
}
