//! Poincaré, geometric and entropy indexes

use crate::index::Index;
use hrv_calculators::{
    HistogramCalc, HistogramMax, HistogramParams, OrderedSubsets, Poincare, PoincareSd,
    StandardDeviation,
};
use hrv_core::{AnalysisConfig, Error, Result};
use hrv_signal::{Calculator, Signal};
use std::f64::consts::PI;
use std::sync::Arc;
use tracing::warn;

fn poincare(signal: &Signal) -> Result<Arc<PoincareSd>> {
    Poincare.get(signal, &(), true)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PoincareSd1;

impl Index for PoincareSd1 {
    fn name(&self) -> String {
        "sd1".to_string()
    }

    fn compute(&self, signal: &Signal, _config: &AnalysisConfig) -> Result<f64> {
        Ok(poincare(signal)?.sd1)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PoincareSd2;

impl Index for PoincareSd2 {
    fn name(&self) -> String {
        "sd2".to_string()
    }

    fn compute(&self, signal: &Signal, _config: &AnalysisConfig) -> Result<f64> {
        Ok(poincare(signal)?.sd2)
    }
}

/// SD1 / SD2
#[derive(Debug, Clone, Copy, Default)]
pub struct Sd1Sd2Ratio;

impl Index for Sd1Sd2Ratio {
    fn name(&self) -> String {
        "sd1_sd2".to_string()
    }

    fn compute(&self, signal: &Signal, _config: &AnalysisConfig) -> Result<f64> {
        let sd = poincare(signal)?;
        if sd.sd2 == 0.0 {
            warn!(sd1 = sd.sd1, "SD2 is zero");
        }
        Ok(sd.sd1 / sd.sd2)
    }
}

/// Area of the Poincaré ellipse, `pi * SD1 * SD2`
#[derive(Debug, Clone, Copy, Default)]
pub struct PoincareEllipseArea;

impl Index for PoincareEllipseArea {
    fn name(&self) -> String {
        "ellipse_area".to_string()
    }

    fn compute(&self, signal: &Signal, _config: &AnalysisConfig) -> Result<f64> {
        let sd = poincare(signal)?;
        Ok(PI * sd.sd1 * sd.sd2)
    }
}

/// Number of intervals over the height of the histogram's highest bin
#[derive(Debug, Clone, Copy, Default)]
pub struct TriangularIndex;

impl Index for TriangularIndex {
    fn name(&self) -> String {
        "triangular_index".to_string()
    }

    fn compute(&self, signal: &Signal, config: &AnalysisConfig) -> Result<f64> {
        let params = HistogramParams::from(config);
        let peak = HistogramMax.get(signal, &params, true)?;
        let histogram = HistogramCalc.get(signal, &params, true)?;
        Ok(histogram.total_count() as f64 / peak.count as f64)
    }
}

/// Sample entropy with embedding dimension `m`
///
/// Tolerance is `AnalysisConfig::sample_entropy_tolerance` times the
/// standard deviation of the series; templates are compared with the
/// Chebyshev distance and self-matches are excluded.
#[derive(Debug, Clone, Copy)]
pub struct SampleEntropy {
    pub dimension: usize,
}

impl Default for SampleEntropy {
    fn default() -> Self {
        Self { dimension: 2 }
    }
}

fn matching_pairs(templates: &[Vec<f64>], tolerance: f64) -> usize {
    let mut count = 0;
    for (i, a) in templates.iter().enumerate() {
        for b in &templates[i + 1..] {
            let distance = a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y).abs())
                .fold(0.0, f64::max);
            if distance <= tolerance {
                count += 1;
            }
        }
    }
    count
}

impl Index for SampleEntropy {
    fn name(&self) -> String {
        "sample_entropy".to_string()
    }

    fn compute(&self, signal: &Signal, config: &AnalysisConfig) -> Result<f64> {
        let m = self.dimension;
        if m == 0 {
            return Err(Error::InvalidParameter(
                "sample entropy dimension must be positive".to_string(),
            ));
        }
        if signal.len() < m + 2 {
            return Err(Error::InsufficientData {
                expected: m + 2,
                actual: signal.len(),
            });
        }

        let sd = StandardDeviation.get(signal, &(), true)?;
        let tolerance = config.sample_entropy_tolerance * *sd;
        let short = OrderedSubsets.get(signal, &m, true)?;
        let long = OrderedSubsets.get(signal, &(m + 1), true)?;
        // Both template sets start at the same N - m positions
        let b = matching_pairs(&short[..long.len()], tolerance);
        let a = matching_pairs(&long, tolerance);
        if a == 0 || b == 0 {
            warn!(a, b, "no template matches, sample entropy is undefined");
        }
        Ok(-(a as f64 / b as f64).ln())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rr(values: &[f64]) -> Signal {
        Signal::from_rr_intervals(values.to_vec()).unwrap()
    }

    #[test]
    fn test_poincare_family_shares_one_entry() {
        let s = rr(&[800.0, 850.0, 820.0, 870.0, 810.0, 860.0]);
        let config = AnalysisConfig::default();
        let sd1 = PoincareSd1.compute(&s, &config).unwrap();
        let sd2 = PoincareSd2.compute(&s, &config).unwrap();
        assert_relative_eq!(Sd1Sd2Ratio.compute(&s, &config).unwrap(), sd1 / sd2);
        assert_relative_eq!(PoincareEllipseArea.compute(&s, &config).unwrap(), PI * sd1 * sd2);
        assert_eq!(s.cache().len(), 1);
    }

    #[test]
    fn test_zero_sd2_gives_infinite_ratio() {
        let s = rr(&[800.0, 900.0, 800.0, 900.0]);
        assert!(Sd1Sd2Ratio.compute(&s, &AnalysisConfig::default()).unwrap().is_infinite());
    }

    #[test]
    fn test_triangular_index() {
        let s = rr(&[800.0, 810.0, 805.0, 900.0, 805.0, 802.0, 1000.0]);
        let config = AnalysisConfig {
            histogram_bins: 4,
            ..AnalysisConfig::default()
        };
        assert_relative_eq!(TriangularIndex.compute(&s, &config).unwrap(), 7.0 / 5.0);
    }

    #[test]
    fn test_sample_entropy_of_periodic_series_is_zero() {
        let values: Vec<f64> = (0..40).map(|i| if i % 2 == 0 { 800.0 } else { 900.0 }).collect();
        let s = rr(&values);
        let value = SampleEntropy::default().compute(&s, &AnalysisConfig::default()).unwrap();
        assert_relative_eq!(value, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sample_entropy_irregular_series_is_positive() {
        let values: Vec<f64> = (0..120)
            .map(|i| 800.0 + 50.0 * ((i * i) as f64 * 0.37).sin())
            .collect();
        let value = SampleEntropy::default()
            .compute(&rr(&values), &AnalysisConfig::default())
            .unwrap();
        assert!(value > 0.0);
    }

    #[test]
    fn test_sample_entropy_needs_enough_samples() {
        let err = SampleEntropy::default()
            .compute(&rr(&[800.0, 810.0, 820.0]), &AnalysisConfig::default())
            .unwrap_err();
        assert!(err.is_insufficient_data());
    }
}
