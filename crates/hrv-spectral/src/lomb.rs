//! Lomb-Scargle periodogram for unevenly sampled series

use hrv_core::{Error, Result};

/// Unnormalized Lomb-Scargle periodogram
///
/// `angular_freqs` are in rad/s and must be positive. The series is used as
/// given (subtract its mean beforehand if required).
pub fn lomb_scargle(times: &[f64], values: &[f64], angular_freqs: &[f64]) -> Result<Vec<f64>> {
    if times.len() != values.len() {
        return Err(Error::size_mismatch(times.len(), values.len(), "lomb-scargle input"));
    }
    if times.is_empty() {
        return Err(Error::empty_input("lomb-scargle"));
    }

    angular_freqs
        .iter()
        .map(|&w| {
            if !(w > 0.0) {
                return Err(Error::InvalidParameter(format!(
                    "lomb-scargle frequencies must be positive, got {w}"
                )));
            }
            Ok(power_at(times, values, w))
        })
        .collect()
}

fn power_at(times: &[f64], values: &[f64], w: f64) -> f64 {
    let (mut xc, mut xs, mut cc, mut ss, mut cs) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (&t, &y) in times.iter().zip(values) {
        let (s, c) = (w * t).sin_cos();
        xc += y * c;
        xs += y * s;
        cc += c * c;
        ss += s * s;
        cs += c * s;
    }

    let tau = (2.0 * cs).atan2(cc - ss) / (2.0 * w);
    let (s_tau, c_tau) = (w * tau).sin_cos();
    let c_tau2 = c_tau * c_tau;
    let s_tau2 = s_tau * s_tau;
    let cs_tau = 2.0 * c_tau * s_tau;

    0.5 * ((c_tau * xc + s_tau * xs).powi(2) / (c_tau2 * cc + cs_tau * cs + s_tau2 * ss)
        + (c_tau * xs - s_tau * xc).powi(2) / (c_tau2 * ss - cs_tau * cs + s_tau2 * cc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_detects_tone_in_irregular_sampling() {
        let times: Vec<f64> = (0..200)
            .map(|i| i as f64 * 0.5 + 0.13 * ((i * 7 % 5) as f64))
            .collect();
        let values: Vec<f64> = times.iter().map(|t| (2.0 * PI * 0.1 * t).sin()).collect();

        let freqs: Vec<f64> = (1..=50).map(|k| k as f64 * 0.01).collect();
        let angular: Vec<f64> = freqs.iter().map(|f| 2.0 * PI * f).collect();
        let power = lomb_scargle(&times, &values, &angular).unwrap();

        let peak = power
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| freqs[i])
            .unwrap();
        assert!((peak - 0.1).abs() < 1e-9, "peak at {peak}");
    }

    #[test]
    fn test_input_validation() {
        assert!(lomb_scargle(&[0.0, 1.0], &[1.0], &[1.0]).is_err());
        assert!(lomb_scargle(&[], &[], &[1.0]).is_err());
        assert!(lomb_scargle(&[0.0, 1.0], &[1.0, 2.0], &[0.0]).is_err());
    }
}
