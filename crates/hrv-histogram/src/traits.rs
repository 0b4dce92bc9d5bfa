use crate::types::Histogram;
use hrv_core::Result;
use num_traits::Float;

/// A binning strategy
pub trait HistogramBuilder<T: Float = f64> {
    /// Bin `sample`; empty or non-finite samples are rejected
    fn build(&self, sample: &[T]) -> Result<Histogram<T>>;
}
