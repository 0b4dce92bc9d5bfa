//! Histogram calculators

use hrv_core::{AnalysisConfig, Error, Result};
use hrv_histogram::{FixedBinsBuilder, Histogram, HistogramBuilder, HistogramPeak, ScottsRule};
use hrv_signal::{Calculator, DataSource};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramParams {
    /// Bin count; `None` lets Scott's rule choose
    pub bins: Option<usize>,
}

impl HistogramParams {
    pub fn new(bins: usize) -> Self {
        Self { bins: Some(bins) }
    }

    pub fn scott() -> Self {
        Self { bins: None }
    }
}

impl From<&AnalysisConfig> for HistogramParams {
    fn from(config: &AnalysisConfig) -> Self {
        Self::new(config.histogram_bins)
    }
}

impl Default for HistogramParams {
    fn default() -> Self {
        Self::from(&AnalysisConfig::default())
    }
}

/// Equal-width histogram of the sample values
#[derive(Debug, Clone, Copy, Default)]
pub struct HistogramCalc;

impl Calculator for HistogramCalc {
    type Params = HistogramParams;
    type Output = Histogram;

    fn name(&self) -> &'static str {
        "histogram"
    }

    fn compute<D: DataSource + ?Sized>(
        &self,
        data: &D,
        params: &HistogramParams,
    ) -> Result<Histogram> {
        match params.bins {
            Some(bins) => FixedBinsBuilder::new(bins)?.build(data.values()),
            None => ScottsRule.build(data.values()),
        }
    }
}

/// The most populated bin of [`HistogramCalc`]'s histogram
///
/// The histogram is requested through the same cache, so both results are
/// stored when caching is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistogramMax;

impl HistogramMax {
    fn peak_of(histogram: &Histogram) -> Result<HistogramPeak> {
        histogram
            .peak()
            .ok_or_else(|| Error::Computation("histogram has no bins".to_string()))
    }
}

impl Calculator for HistogramMax {
    type Params = HistogramParams;
    type Output = HistogramPeak;

    fn name(&self) -> &'static str {
        "histogram_max"
    }

    fn compute<D: DataSource + ?Sized>(
        &self,
        data: &D,
        params: &HistogramParams,
    ) -> Result<HistogramPeak> {
        Self::peak_of(&*HistogramCalc.get(data, params, true)?)
    }

    fn get<D: DataSource + ?Sized>(
        &self,
        data: &D,
        params: &HistogramParams,
        use_cache: bool,
    ) -> Result<Arc<HistogramPeak>> {
        match data.cache() {
            Some(cache) if use_cache => {
                cache.get_or_compute(self.cache_key(params), || self.compute(data, params))
            }
            // Bypassing must not leave the intermediate histogram behind
            _ => Self::peak_of(&*HistogramCalc.get(data, params, false)?).map(Arc::new),
        }
    }
}
