//! Value-level filters producing new signals

use crate::signal::{Signal, TimeBase};
use hrv_core::math::{mean, population_std};
use hrv_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// A transformation from one signal to another
pub trait Filter {
    fn apply(&self, signal: &Signal) -> Result<Signal>;
}

/// `(x - bias) / range` normalization
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalize {
    /// bias = mean, range = 1
    Mean,
    /// bias = mean, range = standard deviation
    #[default]
    Standard,
    /// bias = min, range = 1
    Min,
    /// bias = min, range = max - min
    MaxMin,
    /// Caller supplied bias and range
    Custom { bias: f64, range: f64 },
}

impl Normalize {
    fn bias_and_range(&self, values: &[f64]) -> Result<(f64, f64)> {
        let min = || hrv_core::math::min(values).ok_or_else(|| Error::empty_input("normalize"));
        let max = || hrv_core::math::max(values).ok_or_else(|| Error::empty_input("normalize"));
        Ok(match *self {
            Self::Mean => (mean(values), 1.0),
            Self::Standard => (mean(values), population_std(values)),
            Self::Min => (min()?, 1.0),
            Self::MaxMin => {
                let lo = min()?;
                (lo, max()? - lo)
            }
            Self::Custom { bias, range } => {
                if range == 0.0 {
                    return Err(Error::InvalidParameter(
                        "normalization range must not be zero".to_string(),
                    ));
                }
                (bias, range)
            }
        })
    }
}

impl Filter for Normalize {
    fn apply(&self, signal: &Signal) -> Result<Signal> {
        if signal.is_empty() {
            return Err(Error::empty_input("normalize"));
        }
        let (bias, range) = self.bias_and_range(signal.values())?;
        signal.with_values(signal.values().iter().map(|v| (v - bias) / range).collect())
    }
}

/// Differences between samples `degree` positions apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diff {
    degree: usize,
}

impl Diff {
    pub fn new(degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(Error::InvalidParameter(
                "diff degree must be positive".to_string(),
            ));
        }
        Ok(Self { degree })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }
}

impl Default for Diff {
    fn default() -> Self {
        Self { degree: 1 }
    }
}

impl Filter for Diff {
    /// Each output sample is stamped with the time of the later input sample.
    fn apply(&self, signal: &Signal) -> Result<Signal> {
        let d = self.degree;
        if signal.len() <= d {
            return Err(Error::InsufficientData {
                expected: d + 1,
                actual: signal.len(),
            });
        }
        let values: Vec<f64> = signal.values()[d..]
            .iter()
            .zip(signal.values())
            .map(|(later, earlier)| later - earlier)
            .collect();

        let (start_time, time_base) = match signal.time_base() {
            TimeBase::Evenly => (
                signal.start_time() + d as f64 / signal.sampling_freq(),
                TimeBase::Evenly,
            ),
            TimeBase::Unevenly { indices } => (
                signal.start_time(),
                TimeBase::Unevenly {
                    indices: indices[d..].to_vec(),
                },
            ),
        };
        Ok(signal.with_parts(values, start_time, time_base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::XValues;
    use approx::assert_relative_eq;

    fn signal(values: Vec<f64>) -> Signal {
        Signal::evenly(values, 2.0, "EDA", 0.0).unwrap()
    }

    #[test]
    fn test_normalize_methods() {
        let s = signal(vec![2.0, 4.0, 6.0]);
        assert_eq!(Normalize::Mean.apply(&s).unwrap().values(), &[-2.0, 0.0, 2.0]);
        assert_eq!(Normalize::Min.apply(&s).unwrap().values(), &[0.0, 2.0, 4.0]);
        assert_eq!(Normalize::MaxMin.apply(&s).unwrap().values(), &[0.0, 0.5, 1.0]);

        let standard = Normalize::Standard.apply(&s).unwrap();
        let sd = (8.0f64 / 3.0).sqrt();
        assert_relative_eq!(standard.values()[2], 2.0 / sd, epsilon = 1e-12);

        let custom = Normalize::Custom { bias: 2.0, range: 2.0 }.apply(&s).unwrap();
        assert_eq!(custom.values(), &[0.0, 1.0, 2.0]);
        assert!(Normalize::Custom { bias: 0.0, range: 0.0 }.apply(&s).is_err());
    }

    #[test]
    fn test_diff_evenly() {
        let s = signal(vec![1.0, 4.0, 9.0, 16.0]);
        let d = Diff::new(2).unwrap().apply(&s).unwrap();
        assert_eq!(d.values(), &[8.0, 12.0]);
        assert_eq!(d.start_time(), 1.0);
        assert!(Diff::new(0).is_err());
        assert!(Diff::new(4).unwrap().apply(&s).is_err());
    }

    #[test]
    fn test_diff_unevenly_keeps_later_times() {
        let s = Signal::unevenly(
            vec![1.0, 3.0, 6.0],
            XValues::Indices(vec![0, 5, 9]),
            10.0,
            "RR",
            None,
        )
        .unwrap();
        let d = Diff::default().apply(&s).unwrap();
        assert_eq!(d.values(), &[2.0, 3.0]);
        assert_eq!(d.times(), vec![0.5, 0.9]);
    }
}
