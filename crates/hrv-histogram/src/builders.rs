//! Histogram building strategies

use crate::traits::HistogramBuilder;
use crate::types::{cast, Histogram};
use hrv_core::{Error, Result};
use num_traits::Float;

/// Histogram with a fixed number of equal-width bins
///
/// Bins span `[min, max]` of the sample. Every bin is half-open except the
/// last, which also holds values equal to the maximum. A constant sample is
/// widened to `[v - 0.5, v + 0.5]`.
#[derive(Debug, Clone, Copy)]
pub struct FixedBinsBuilder {
    num_bins: usize,
}

impl FixedBinsBuilder {
    pub fn new(num_bins: usize) -> Result<Self> {
        if num_bins == 0 {
            return Err(Error::InvalidParameter(
                "histogram needs at least one bin".to_string(),
            ));
        }
        Ok(Self { num_bins })
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    fn bin_index<T: Float>(&self, value: T, edges: &[T], norm: T) -> usize {
        let last = self.num_bins - 1;
        let mut idx = ((value - edges[0]) * norm)
            .floor()
            .to_usize()
            .unwrap_or(0)
            .min(last);
        // Rounding in the scaled index can land one bin off the exact edges
        if idx > 0 && value < edges[idx] {
            idx -= 1;
        } else if idx < last && value >= edges[idx + 1] {
            idx += 1;
        }
        idx
    }
}

impl<T: Float> HistogramBuilder<T> for FixedBinsBuilder {
    fn build(&self, sample: &[T]) -> Result<Histogram<T>> {
        if sample.is_empty() {
            return Err(Error::empty_input("histogram"));
        }
        if sample.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("histogram sample"));
        }

        let mut lo = sample.iter().copied().fold(T::infinity(), T::min);
        let mut hi = sample.iter().copied().fold(T::neg_infinity(), T::max);
        if lo == hi {
            let half = cast::<T>(1) / cast(2);
            lo = lo - half;
            hi = hi + half;
        }

        let n_bins: T = cast(self.num_bins);
        let width = (hi - lo) / n_bins;
        let edges: Vec<T> = (0..=self.num_bins)
            .map(|i| {
                if i == self.num_bins {
                    hi
                } else {
                    lo + width * cast(i)
                }
            })
            .collect();

        let norm = n_bins / (hi - lo);
        let mut counts = vec![0usize; self.num_bins];
        for &value in sample {
            counts[self.bin_index(value, &edges, norm)] += 1;
        }

        Ok(Histogram::from_parts(edges, counts))
    }
}

/// Scott's rule: bin width `3.5 * sigma * n^(-1/3)` over the sample range
#[derive(Debug, Clone, Copy, Default)]
pub struct ScottsRule;

impl ScottsRule {
    /// Bin count the rule picks for `sample`
    pub fn bin_count<T: Float>(&self, sample: &[T]) -> Result<usize> {
        if sample.is_empty() {
            return Err(Error::empty_input("histogram"));
        }
        if sample.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("histogram sample"));
        }

        let n: T = cast(sample.len());
        let mean = sample.iter().fold(T::zero(), |acc, &x| acc + x) / n;
        let variance = sample.iter().fold(T::zero(), |acc, &x| {
            let d = x - mean;
            acc + d * d
        }) / n;
        let three_point_five = cast::<T>(7) / cast(2);
        let width = three_point_five * variance.sqrt() * n.powf(-(T::one() / cast(3)));

        let lo = sample.iter().copied().fold(T::infinity(), T::min);
        let hi = sample.iter().copied().fold(T::neg_infinity(), T::max);
        if width <= T::epsilon() {
            return Ok(1);
        }
        Ok(((hi - lo) / width).ceil().to_usize().unwrap_or(1).max(1))
    }
}

impl<T: Float> HistogramBuilder<T> for ScottsRule {
    fn build(&self, sample: &[T]) -> Result<Histogram<T>> {
        FixedBinsBuilder::new(self.bin_count(sample)?)?.build(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_bins_basic() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let hist = FixedBinsBuilder::new(5).unwrap().build(&data).unwrap();

        assert_eq!(hist.len(), 5);
        assert_eq!(hist.total_count(), 10);
        assert_eq!(hist.counts(), vec![2, 2, 2, 2, 2]);
        assert_eq!(hist.min(), 1.0);
        assert_eq!(hist.max(), 10.0);
    }

    #[test]
    fn test_maximum_lands_in_last_bin() {
        let data = [0.0, 1.0, 2.0, 3.0];
        let hist = FixedBinsBuilder::new(3).unwrap().build(&data).unwrap();
        assert_eq!(hist.counts(), vec![1, 1, 2]);
    }

    #[test]
    fn test_constant_sample_widened() {
        let hist = FixedBinsBuilder::new(4).unwrap().build(&[5.0; 6]).unwrap();
        assert_eq!(hist.min(), 4.5);
        assert_eq!(hist.max(), 5.5);
        assert_eq!(hist.counts().iter().sum::<usize>(), 6);
        assert_eq!(hist.counts()[2], 6);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(FixedBinsBuilder::new(0).is_err());
        let builder = FixedBinsBuilder::new(3).unwrap();
        assert!(matches!(
            HistogramBuilder::<f64>::build(&builder, &[]),
            Err(Error::InsufficientData { .. })
        ));
        assert!(builder.build(&[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_scotts_rule() {
        let data: Vec<f64> = (0..64).map(|i| i as f64).collect();
        // sigma ~ 18.47, width ~ 16.16, range 63
        assert_eq!(ScottsRule.bin_count(&data).unwrap(), 4);
        let hist = ScottsRule.build(&data).unwrap();
        assert_eq!(hist.len(), 4);
        assert_eq!(hist.total_count(), 64);
        assert_eq!(ScottsRule.bin_count(&[3.0; 5]).unwrap(), 1);
        assert!(ScottsRule.bin_count::<f64>(&[]).is_err());
    }
}
