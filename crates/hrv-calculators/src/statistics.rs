//! Time-domain and nonlinear building blocks

use hrv_core::math::{diff, population_std};
use hrv_core::{Error, Result};
use hrv_signal::{Calculator, DataSource};
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

/// Successive differences `x[i+1] - x[i]`
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstDifference;

impl Calculator for FirstDifference {
    type Params = ();
    type Output = Vec<f64>;

    fn name(&self) -> &'static str {
        "diff"
    }

    fn compute<D: DataSource + ?Sized>(&self, data: &D, _params: &()) -> Result<Vec<f64>> {
        Ok(diff(data.values()))
    }
}

/// Population standard deviation of the sample values
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDeviation;

impl Calculator for StandardDeviation {
    type Params = ();
    type Output = f64;

    fn name(&self) -> &'static str {
        "standard_deviation"
    }

    fn compute<D: DataSource + ?Sized>(&self, data: &D, _params: &()) -> Result<f64> {
        let values = data.values();
        if values.is_empty() {
            return Err(Error::empty_input("standard deviation"));
        }
        Ok(population_std(values))
    }
}

/// Every contiguous window of the given length, in order
///
/// A series shorter than the length has no windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedSubsets;

impl Calculator for OrderedSubsets {
    type Params = usize;
    type Output = Vec<Vec<f64>>;

    fn name(&self) -> &'static str {
        "ordered_subsets"
    }

    fn compute<D: DataSource + ?Sized>(&self, data: &D, length: &usize) -> Result<Vec<Vec<f64>>> {
        if *length == 0 {
            return Err(Error::InvalidParameter(
                "subset length must be positive".to_string(),
            ));
        }
        Ok(data.values().windows(*length).map(<[f64]>::to_vec).collect())
    }
}

/// Poincaré plot descriptors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoincareSd {
    /// Spread across the identity line (short-term variability)
    pub sd1: f64,
    /// Spread along the identity line (long-term variability)
    pub sd2: f64,
}

/// SD1/SD2 of successive sample pairs `(x[i], x[i+1])`
#[derive(Debug, Clone, Copy, Default)]
pub struct Poincare;

impl Calculator for Poincare {
    type Params = ();
    type Output = PoincareSd;

    fn name(&self) -> &'static str {
        "poincare_sd"
    }

    fn compute<D: DataSource + ?Sized>(&self, data: &D, _params: &()) -> Result<PoincareSd> {
        let values = data.values();
        if values.len() < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: values.len(),
            });
        }
        let (across, along): (Vec<f64>, Vec<f64>) = values
            .windows(2)
            .map(|pair| ((pair[0] - pair[1]) / SQRT_2, (pair[0] + pair[1]) / SQRT_2))
            .unzip();
        Ok(PoincareSd {
            sd1: population_std(&across),
            sd2: population_std(&along),
        })
    }
}
