//! # Segmentation of HRV signals
//!
//! Segment generators split a bound [`Signal`](hrv_signal::Signal) into
//! labelled positional ranges, one [`SegmentGenerator::advance`] call at a
//! time. Four policies are provided:
//!
//! - [`LengthSegments`]: fixed sample count
//! - [`TimeSegments`]: fixed duration
//! - [`ExistingSegments`]: a prepared list, re-bound to each new signal
//! - [`FromEventsSegments`]: boundaries taken from [`EventMarkers`]
//!
//! No generator ever yields an empty segment.
//!
//! ```rust
//! use hrv_segmentation::{LengthSegments, SegmentGenerator};
//! use hrv_signal::Signal;
//! use std::sync::Arc;
//!
//! let signal = Arc::new(Signal::evenly(vec![0.0; 256], 4.0, "ECG", 0.0).unwrap());
//! let mut generator = LengthSegments::new(64).unwrap();
//! generator.initialize(Some(signal)).unwrap();
//! let segments = generator.collect_segments().unwrap();
//! assert_eq!(segments.len(), 4);
//! ```

pub mod generator;
pub mod policies;
pub mod segment;

pub use generator::{Advance, GeneratorState, SegmentGenerator, Segments};
pub use policies::{ExistingSegments, FromEventsSegments, LengthSegments, TimeSegments};
pub use segment::{EventMarkers, Segment};
