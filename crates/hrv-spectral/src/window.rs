//! Tapering windows

use std::f64::consts::PI;

/// Symmetric Hamming window of length `n`
pub fn hamming(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let denom = (n - 1) as f64;
            (0..n)
                .map(|k| 0.54 - 0.46 * (2.0 * PI * k as f64 / denom).cos())
                .collect()
        }
    }
}

/// Periodic Hann window of length `n` (the spectral-analysis variant)
pub fn hann_periodic(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => (0..n)
            .map(|k| 0.5 - 0.5 * (2.0 * PI * k as f64 / n as f64).cos())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hamming_endpoints_and_symmetry() {
        let w = hamming(9);
        assert_relative_eq!(w[0], 0.08, epsilon = 1e-12);
        assert_relative_eq!(w[8], 0.08, epsilon = 1e-12);
        assert_relative_eq!(w[4], 1.0, epsilon = 1e-12);
        for k in 0..9 {
            assert_relative_eq!(w[k], w[8 - k], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_hann_periodic() {
        let w = hann_periodic(4);
        assert_relative_eq!(w[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(w[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(w[2], 1.0, epsilon = 1e-12);
        assert_relative_eq!(w[3], 0.5, epsilon = 1e-12);
    }
}
