//! # HRV indexes
//!
//! Scalar indexes over RR-interval signals and their evaluation per segment.
//!
//! - [`time_domain`]: mean RR/HR, RR spread, RMSSD, SDSD, pNNx, NNx
//! - [`frequency_domain`]: band powers, normalized powers, LF/HF, spectral entropy
//! - [`nonlinear`]: Poincaré SD1/SD2, triangular index, sample entropy
//! - [`SegmentMapper`]: drives a segment generator and fills a [`SegmentTable`]
//!
//! ```rust
//! use hrv_core::AnalysisConfig;
//! use hrv_indexes::{standard_indexes, SegmentMapper};
//! use hrv_segmentation::TimeSegments;
//! use hrv_signal::Signal;
//! use std::sync::Arc;
//!
//! let rr: Vec<f64> = (0..600).map(|i| 820.0 + 35.0 * (i as f64 * 0.45).sin()).collect();
//! let signal = Arc::new(Signal::from_rr_intervals(rr).unwrap());
//!
//! let mapper = SegmentMapper::new(standard_indexes(), AnalysisConfig::default()).unwrap();
//! let mut windows = TimeSegments::new(120.0).unwrap();
//! let table = mapper.map(&mut windows, signal).unwrap();
//!
//! assert!(!table.is_empty());
//! assert_eq!(table.rows[0].values.len(), table.labels.len());
//! ```

pub mod frequency_domain;
pub mod index;
pub mod mapper;
pub mod nonlinear;
pub mod time_domain;

pub use frequency_domain::{BandPower, LfHf, NormalizedPower, SpectralEntropy};
pub use index::{Band, Index};
pub use mapper::{SegmentMapper, SegmentRow, SegmentTable};
pub use nonlinear::{
    PoincareEllipseArea, PoincareSd1, PoincareSd2, SampleEntropy, Sd1Sd2Ratio, TriangularIndex,
};
pub use time_domain::{HrMean, Nnx, Pnnx, Rmssd, RrMean, RrStd, Sdsd};

/// The default index set, in column order
pub fn standard_indexes() -> Vec<Box<dyn Index>> {
    vec![
        Box::new(RrMean),
        Box::new(HrMean),
        Box::new(RrStd),
        Box::new(Rmssd),
        Box::new(Sdsd),
        Box::new(Pnnx::default()),
        Box::new(Nnx::default()),
        Box::new(BandPower(Band::Vlf)),
        Box::new(BandPower(Band::Lf)),
        Box::new(BandPower(Band::Hf)),
        Box::new(BandPower(Band::Total)),
        Box::new(LfHf),
        Box::new(PoincareSd1),
        Box::new(PoincareSd2),
        Box::new(Sd1Sd2Ratio),
        Box::new(TriangularIndex),
        Box::new(SampleEntropy::default()),
    ]
}
