//! Histogram result types

use num_traits::{Float, NumCast};
use std::fmt;

pub(crate) fn cast<T: Float>(n: usize) -> T {
    <T as NumCast>::from(n).unwrap_or_else(T::nan)
}

/// The most populated bin of a histogram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramPeak<T: Float = f64> {
    /// Position of the bin (first one wins on ties)
    pub bin_index: usize,
    pub count: usize,
    pub left: T,
    pub right: T,
}

/// Bin counts over `edges.len() - 1` contiguous bins
///
/// Bin `i` covers `[edges[i], edges[i + 1])`; the last bin also holds its
/// right edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram<T: Float = f64> {
    edges: Vec<T>,
    counts: Vec<usize>,
}

impl<T: Float> Histogram<T> {
    /// Pair `edges` with `counts`; callers guarantee `edges.len() == counts.len() + 1`
    pub(crate) fn from_parts(edges: Vec<T>, counts: Vec<usize>) -> Self {
        debug_assert_eq!(edges.len(), counts.len() + 1);
        Self { edges, counts }
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Bin edges, including the rightmost one
    pub fn edges(&self) -> &[T] {
        &self.edges
    }

    /// Number of binned samples
    pub fn total_count(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Lower edge of the first bin
    pub fn min(&self) -> T {
        self.edges.first().copied().unwrap_or_else(T::nan)
    }

    /// Upper edge of the last bin
    pub fn max(&self) -> T {
        self.edges.last().copied().unwrap_or_else(T::nan)
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// `[left, right)` of bin `i`
    pub fn bin_range(&self, i: usize) -> Option<(T, T)> {
        Some((*self.edges.get(i)?, *self.edges.get(i + 1)?))
    }

    /// Locate the bin with the greatest count
    pub fn peak(&self) -> Option<HistogramPeak<T>> {
        let count = self.max_count();
        let bin_index = self.counts.iter().position(|&c| c == count)?;
        let (left, right) = self.bin_range(bin_index)?;
        Some(HistogramPeak {
            bin_index,
            count,
            left,
            right,
        })
    }

    /// Bin holding `value`, or `None` outside `[min, max]`
    pub fn find_bin(&self, value: T) -> Option<usize> {
        if self.is_empty() || value < self.min() || value > self.max() {
            return None;
        }
        let upper = self.edges.partition_point(|&edge| edge <= value);
        Some(upper.saturating_sub(1).min(self.len() - 1))
    }
}

impl<T: Float + fmt::Display> fmt::Display for Histogram<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Histogram({} bins, n={}, range=[{:.3}, {:.3}])",
            self.len(),
            self.total_count(),
            self.min(),
            self.max()
        )
    }
}
