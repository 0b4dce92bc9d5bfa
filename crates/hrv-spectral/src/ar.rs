//! Autoregressive spectral estimation
//!
//! Yule-Walker fitting on the biased autocorrelation sequence and the
//! conversion of a fitted model into a power spectrum.

use crate::periodogram::real_fft;
use hrv_core::{Error, Result};
use nalgebra::{DMatrix, DVector};

/// Fitted AR model `x[t] + a1 x[t-1] + ... + ap x[t-p] = e[t]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArModel {
    /// `a1..ap`
    pub coefficients: Vec<f64>,
    /// Variance of the driving noise `e`
    pub noise_variance: f64,
}

impl ArModel {
    /// Degenerate first-order model used when no fit is available
    pub fn unit() -> Self {
        Self {
            coefficients: vec![1.0],
            noise_variance: 1.0,
        }
    }

    pub fn order(&self) -> usize {
        self.coefficients.len()
    }

    /// Two-sided power spectrum on `nfft` DFT bins
    ///
    /// `P(k) = noise_variance / |A(e^{-i 2 pi k / nfft})|^2`
    pub fn psd(&self, nfft: usize) -> Result<Vec<f64>> {
        if nfft <= self.order() {
            return Err(Error::InvalidParameter(format!(
                "nfft ({nfft}) must exceed the model order ({})",
                self.order()
            )));
        }
        let mut denominator = Vec::with_capacity(self.order() + 1);
        denominator.push(1.0);
        denominator.extend_from_slice(&self.coefficients);

        Ok(real_fft(&denominator, nfft)
            .iter()
            .map(|c| self.noise_variance / c.norm_sqr())
            .collect())
    }
}

/// Biased autocorrelation `r[k] = (1/n) * sum x[i] x[i+k]` for `k = 0..=max_lag`
pub fn autocorrelation_biased(x: &[f64], max_lag: usize) -> Vec<f64> {
    let n = x.len();
    (0..=max_lag)
        .map(|k| {
            if k >= n {
                0.0
            } else {
                x[..n - k].iter().zip(&x[k..]).map(|(a, b)| a * b).sum::<f64>() / n as f64
            }
        })
        .collect()
}

/// Fit an AR model of the given order by solving the Yule-Walker equations
///
/// Fails when the autocorrelation matrix is not positive definite or the
/// implied noise variance is not positive.
pub fn yule_walker(x: &[f64], order: usize) -> Result<ArModel> {
    if order == 0 {
        return Err(Error::InvalidParameter(
            "autoregressive order must be at least 1".to_string(),
        ));
    }
    if x.len() <= order {
        return Err(Error::InsufficientData {
            expected: order + 1,
            actual: x.len(),
        });
    }

    let r = autocorrelation_biased(x, order);
    if !(r[0] > 0.0) || !r[0].is_finite() {
        return Err(Error::Computation(
            "autocorrelation at lag 0 is not positive".to_string(),
        ));
    }

    let toeplitz = DMatrix::from_fn(order, order, |i, j| r[i.abs_diff(j)]);
    let rhs = DVector::from_iterator(order, r[1..=order].iter().map(|v| -v));
    let cholesky = toeplitz.cholesky().ok_or_else(|| {
        Error::Computation(format!(
            "Yule-Walker system of order {order} is not positive definite"
        ))
    })?;
    let solution = cholesky.solve(&rhs);
    let coefficients: Vec<f64> = solution.iter().copied().collect();

    let noise_variance = r[0]
        + coefficients
            .iter()
            .zip(&r[1..])
            .map(|(a, rk)| a * rk)
            .sum::<f64>();
    if !(noise_variance > 0.0) || coefficients.iter().any(|a| !a.is_finite()) {
        return Err(Error::Computation(format!(
            "Yule-Walker fit of order {order} is degenerate (noise variance {noise_variance})"
        )));
    }

    Ok(ArModel {
        coefficients,
        noise_variance,
    })
}
