//! Time-domain indexes over RR intervals in milliseconds

use crate::index::Index;
use hrv_calculators::{FirstDifference, StandardDeviation};
use hrv_core::math::{mean, population_std};
use hrv_core::{AnalysisConfig, Error, Result};
use hrv_signal::{Calculator, Signal};
use std::sync::Arc;

fn require(signal: &Signal, expected: usize) -> Result<()> {
    if signal.len() < expected {
        return Err(Error::InsufficientData {
            expected,
            actual: signal.len(),
        });
    }
    Ok(())
}

fn differences(signal: &Signal) -> Result<Arc<Vec<f64>>> {
    require(signal, 2)?;
    FirstDifference.get(signal, &(), true)
}

/// Mean RR interval
#[derive(Debug, Clone, Copy, Default)]
pub struct RrMean;

impl Index for RrMean {
    fn name(&self) -> String {
        "rr_mean".to_string()
    }

    fn compute(&self, signal: &Signal, _config: &AnalysisConfig) -> Result<f64> {
        require(signal, 1)?;
        Ok(mean(signal.values()))
    }
}

/// Mean heart rate in beats per minute, `60000 / mean RR`
#[derive(Debug, Clone, Copy, Default)]
pub struct HrMean;

impl Index for HrMean {
    fn name(&self) -> String {
        "hr_mean".to_string()
    }

    fn compute(&self, signal: &Signal, config: &AnalysisConfig) -> Result<f64> {
        Ok(60_000.0 / RrMean.compute(signal, config)?)
    }
}

/// Population standard deviation of the RR intervals
#[derive(Debug, Clone, Copy, Default)]
pub struct RrStd;

impl Index for RrStd {
    fn name(&self) -> String {
        "rr_std".to_string()
    }

    fn compute(&self, signal: &Signal, _config: &AnalysisConfig) -> Result<f64> {
        require(signal, 1)?;
        Ok(*StandardDeviation.get(signal, &(), true)?)
    }
}

/// Root mean square of successive differences, `sqrt(sum(d^2) / (n_d - 1))`
#[derive(Debug, Clone, Copy, Default)]
pub struct Rmssd;

impl Index for Rmssd {
    fn name(&self) -> String {
        "rmssd".to_string()
    }

    fn compute(&self, signal: &Signal, _config: &AnalysisConfig) -> Result<f64> {
        require(signal, 3)?;
        let d = differences(signal)?;
        let squares: f64 = d.iter().map(|x| x * x).sum();
        Ok((squares / (d.len() - 1) as f64).sqrt())
    }
}

/// Standard deviation of successive differences
#[derive(Debug, Clone, Copy, Default)]
pub struct Sdsd;

impl Index for Sdsd {
    fn name(&self) -> String {
        "sdsd".to_string()
    }

    fn compute(&self, signal: &Signal, _config: &AnalysisConfig) -> Result<f64> {
        Ok(population_std(&differences(signal)?))
    }
}

fn count_above(d: &[f64], threshold: f64) -> usize {
    d.iter().filter(|x| x.abs() > threshold).count()
}

/// Percentage of successive differences larger than a threshold in ms
///
/// Without an explicit threshold, `AnalysisConfig::nnx_threshold` applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pnnx {
    pub threshold: Option<f64>,
}

impl Pnnx {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: Some(threshold),
        }
    }
}

impl Index for Pnnx {
    fn name(&self) -> String {
        match self.threshold {
            Some(x) => format!("pnn{x}"),
            None => "pnnx".to_string(),
        }
    }

    fn compute(&self, signal: &Signal, config: &AnalysisConfig) -> Result<f64> {
        let d = differences(signal)?;
        let threshold = self.threshold.unwrap_or(config.nnx_threshold);
        Ok(100.0 * count_above(&d, threshold) as f64 / d.len() as f64)
    }
}

/// Number of successive differences larger than a threshold in ms
#[derive(Debug, Clone, Copy, Default)]
pub struct Nnx {
    pub threshold: Option<f64>,
}

impl Nnx {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: Some(threshold),
        }
    }
}

impl Index for Nnx {
    fn name(&self) -> String {
        match self.threshold {
            Some(x) => format!("nn{x}"),
            None => "nnx".to_string(),
        }
    }

    fn compute(&self, signal: &Signal, config: &AnalysisConfig) -> Result<f64> {
        let d = differences(signal)?;
        let threshold = self.threshold.unwrap_or(config.nnx_threshold);
        Ok(count_above(&d, threshold) as f64)
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
    fn test_means() {
        let s = rr(&[800.0, 1000.0, 1200.0]);
        let config = AnalysisConfig::default();
        assert_relative_eq!(RrMean.compute(&s, &config).unwrap(), 1000.0);
        assert_relative_eq!(HrMean.compute(&s, &config).unwrap(), 60.0);
    }

    #[test]
    fn test_successive_differences() {
        // differences: 100, -60, 20
        let s = rr(&[800.0, 900.0, 840.0, 860.0]);
        let config = AnalysisConfig::default();
        assert_relative_eq!(
            Rmssd.compute(&s, &config).unwrap(),
            (14_000.0f64 / 2.0).sqrt(),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            Sdsd.compute(&s, &config).unwrap(),
            population_std(&[100.0, -60.0, 20.0]),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            Pnnx::default().compute(&s, &config).unwrap(),
            200.0 / 3.0,
            epsilon = 1e-9
        );
        assert_eq!(Nnx::new(25.0).compute(&s, &config).unwrap(), 2.0);
        assert_eq!(Pnnx::new(10.0).compute(&s, &config).unwrap(), 100.0);
    }

    #[test]
    fn test_shared_difference_cache() {
        let s = rr(&[800.0, 900.0, 840.0, 860.0]);
        let config = AnalysisConfig::default();
        Rmssd.compute(&s, &config).unwrap();
        Sdsd.compute(&s, &config).unwrap();
        Pnnx::default().compute(&s, &config).unwrap();
        let stats = s.cache().stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
    }

    #[test]
    fn test_short_series() {
        let config = AnalysisConfig::default();
        assert!(Rmssd.compute(&rr(&[800.0, 810.0]), &config).unwrap_err().is_insufficient_data());
        assert!(Pnnx::default()
            .compute(&rr(&[800.0]), &config)
            .unwrap_err()
            .is_insufficient_data());
    }

    #[test]
    fn test_names() {
        assert_eq!(Pnnx::new(50.0).name(), "pnn50");
        assert_eq!(Nnx::new(20.0).name(), "nn20");
        assert_eq!(Pnnx::default().name(), "pnnx");
    }
}
