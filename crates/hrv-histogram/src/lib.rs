//! Fixed-bin-count histograms
//!
//! Geometric HRV indexes (triangular index, TINN-style measures) are built on
//! a histogram of the RR series and on its most populated bin. This crate
//! provides both, with binning that matches the common array-library
//! convention: `num_bins` equal bins spanning the sample range, the last bin
//! closed on the right. [`ScottsRule`] picks the bin count from the sample
//! spread instead.
//!
//! ```rust
//! use hrv_histogram::{FixedBinsBuilder, HistogramBuilder};
//!
//! let rr = vec![812.0, 790.0, 805.0, 830.0, 798.0, 801.0];
//! let histogram = FixedBinsBuilder::new(4).unwrap().build(&rr).unwrap();
//! let peak = histogram.peak().unwrap();
//! assert_eq!(histogram.counts().iter().sum::<usize>(), rr.len());
//! assert_eq!(peak.count, histogram.max_count());
//! ```

pub mod builders;
pub mod traits;
pub mod types;

pub use builders::{FixedBinsBuilder, ScottsRule};
pub use traits::HistogramBuilder;
pub use types::{Histogram, HistogramPeak};
