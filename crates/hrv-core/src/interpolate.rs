//! One-dimensional interpolation used for resampling and spectral gridding

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Interpolation methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationKind {
    /// Piecewise linear
    Linear,
    /// Value of the nearest sample (ties go to the earlier sample)
    Nearest,
    /// Value of the preceding sample (zero-order hold)
    Zero,
    /// Natural cubic spline
    #[default]
    #[serde(alias = "spline")]
    Cubic,
}

impl InterpolationKind {
    /// Get the name of this method
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Nearest => "nearest",
            Self::Zero => "zero",
            Self::Cubic => "cubic",
        }
    }

    /// Fewest samples this method can interpolate
    pub fn min_points(&self) -> usize {
        match self {
            Self::Cubic => 4,
            _ => 2,
        }
    }
}

impl fmt::Display for InterpolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterpolationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "nearest" => Ok(Self::Nearest),
            "zero" => Ok(Self::Zero),
            "cubic" | "spline" => Ok(Self::Cubic),
            other => Err(Error::InvalidParameter(format!(
                "unknown interpolation kind '{other}'"
            ))),
        }
    }
}

/// Interpolant over strictly increasing abscissae
///
/// Evaluation outside `[xs[0], xs[n-1]]` extends the first or last piece.
#[derive(Debug, Clone)]
pub struct Interpolator {
    kind: InterpolationKind,
    xs: Vec<f64>,
    ys: Vec<f64>,
    // Second derivatives at the knots, cubic only
    moments: Vec<f64>,
}

impl Interpolator {
    pub fn new(xs: &[f64], ys: &[f64], kind: InterpolationKind) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::size_mismatch(xs.len(), ys.len(), "interpolation abscissae"));
        }
        if xs.len() < kind.min_points() {
            return Err(Error::InsufficientData {
                expected: kind.min_points(),
                actual: xs.len(),
            });
        }
        if let Some(pos) = xs.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(Error::non_monotonic("interpolation abscissae", pos + 1));
        }

        let moments = match kind {
            InterpolationKind::Cubic => natural_spline_moments(xs, ys),
            _ => Vec::new(),
        };

        Ok(Self {
            kind,
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            moments,
        })
    }

    pub fn kind(&self) -> InterpolationKind {
        self.kind
    }

    fn segment(&self, x: f64) -> usize {
        let last = self.xs.len() - 2;
        self.xs.partition_point(|&k| k <= x).saturating_sub(1).min(last)
    }

    /// Evaluate the interpolant at `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        let i = self.segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        let h = x1 - x0;

        match self.kind {
            InterpolationKind::Linear => y0 + (y1 - y0) * (x - x0) / h,
            InterpolationKind::Nearest => {
                if x - x0 <= x1 - x {
                    y0
                } else {
                    y1
                }
            }
            InterpolationKind::Zero => {
                if x >= x1 {
                    y1
                } else {
                    y0
                }
            }
            InterpolationKind::Cubic => {
                let (m0, m1) = (self.moments[i], self.moments[i + 1]);
                let a = x1 - x;
                let b = x - x0;
                m0 * a.powi(3) / (6.0 * h)
                    + m1 * b.powi(3) / (6.0 * h)
                    + (y0 / h - m0 * h / 6.0) * a
                    + (y1 / h - m1 * h / 6.0) * b
            }
        }
    }

    /// Evaluate at every point of `targets`
    pub fn sample(&self, targets: &[f64]) -> Vec<f64> {
        targets.iter().map(|&x| self.evaluate(x)).collect()
    }
}

// Thomas algorithm on the natural-boundary tridiagonal system
fn natural_spline_moments(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut moments = vec![0.0; n];
    if n < 3 {
        return moments;
    }

    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let inner = n - 2;
    let mut diag = vec![0.0; inner];
    let mut upper = vec![0.0; inner];
    let mut rhs = vec![0.0; inner];

    for k in 0..inner {
        let i = k + 1;
        diag[k] = 2.0 * (h[i - 1] + h[i]);
        upper[k] = h[i];
        rhs[k] = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
    }

    for k in 1..inner {
        let lower = h[k];
        let w = lower / diag[k - 1];
        diag[k] -= w * upper[k - 1];
        rhs[k] -= w * rhs[k - 1];
    }

    moments[inner] = rhs[inner - 1] / diag[inner - 1];
    for k in (0..inner - 1).rev() {
        moments[k + 1] = (rhs[k] - upper[k] * moments[k + 2]) / diag[k];
    }
    moments
}

/// Interpolate an irregular series onto the grid `t0 + k / freq`
///
/// The grid runs from the first time up to and including the last time.
/// Returns `(grid_times, grid_values)`.
pub fn interpolate_to_rate(
    times: &[f64],
    values: &[f64],
    freq: f64,
    kind: InterpolationKind,
) -> Result<(Vec<f64>, Vec<f64>)> {
    if !(freq > 0.0 && freq.is_finite()) {
        return Err(Error::InvalidParameter(format!(
            "interpolation frequency must be positive, got {freq}"
        )));
    }
    let interpolator = Interpolator::new(times, values, kind)?;
    let t0 = times[0];
    let span = times[times.len() - 1] - t0;
    let count = (span * freq + 1e-9).floor() as usize + 1;
    let grid: Vec<f64> = (0..count).map(|k| t0 + k as f64 / freq).collect();
    let resampled = interpolator.sample(&grid);
    Ok((grid, resampled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_interpolation() {
        let interp =
            Interpolator::new(&[0.0, 1.0, 2.0], &[0.0, 10.0, 0.0], InterpolationKind::Linear)
                .unwrap();
        assert_relative_eq!(interp.evaluate(0.5), 5.0);
        assert_relative_eq!(interp.evaluate(1.5), 5.0);
        assert_relative_eq!(interp.evaluate(2.0), 0.0);
    }

    #[test]
    fn test_nearest_and_zero() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [1.0, 2.0, 3.0];
        let nearest = Interpolator::new(&xs, &ys, InterpolationKind::Nearest).unwrap();
        assert_eq!(nearest.evaluate(0.4), 1.0);
        assert_eq!(nearest.evaluate(0.5), 1.0);
        assert_eq!(nearest.evaluate(0.6), 2.0);

        let zero = Interpolator::new(&xs, &ys, InterpolationKind::Zero).unwrap();
        assert_eq!(zero.evaluate(0.99), 1.0);
        assert_eq!(zero.evaluate(1.0), 2.0);
        assert_eq!(zero.evaluate(2.0), 3.0);
    }

    #[test]
    fn test_cubic_passes_through_knots() {
        let xs = [0.0, 0.8, 1.7, 2.5, 3.1];
        let ys = [1.0, -0.5, 2.0, 0.3, 0.9];
        let spline = Interpolator::new(&xs, &ys, InterpolationKind::Cubic).unwrap();
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(spline.evaluate(x), y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_cubic_reproduces_linear_data() {
        let xs = [0.0, 1.0, 2.5, 3.0, 4.2];
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x - 1.0).collect();
        let spline = Interpolator::new(&xs, &ys, InterpolationKind::Cubic).unwrap();
        assert_relative_eq!(spline.evaluate(1.7), 3.0 * 1.7 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cubic_requires_four_points() {
        let err = Interpolator::new(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0], InterpolationKind::Cubic)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientData {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_rejects_unordered_abscissae() {
        let err = Interpolator::new(&[0.0, 2.0, 1.0], &[0.0; 3], InterpolationKind::Linear)
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_interpolate_to_rate_grid() {
        let times = [0.0, 0.9, 2.1, 3.0];
        let values = [1.0, 1.0, 1.0, 1.0];
        let (grid, resampled) =
            interpolate_to_rate(&times, &values, 4.0, InterpolationKind::Linear).unwrap();
        assert_eq!(grid.len(), 13);
        assert_relative_eq!(grid[12], 3.0);
        assert!(resampled.iter().all(|&v| (v - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("spline".parse::<InterpolationKind>().unwrap(), InterpolationKind::Cubic);
        assert_eq!("LINEAR".parse::<InterpolationKind>().unwrap(), InterpolationKind::Linear);
        assert!("quadratic".parse::<InterpolationKind>().is_err());
    }
}
