//! Small numeric helpers shared across crates

use statrs::statistics::Statistics;

/// Arithmetic mean (NaN for empty input)
pub fn mean(values: &[f64]) -> f64 {
    values.iter().mean()
}

/// Population standard deviation (NaN for empty input)
pub fn population_std(values: &[f64]) -> f64 {
    values.iter().population_std_dev()
}

/// Subtract the mean from every value
pub fn demean(values: &[f64]) -> Vec<f64> {
    let m = mean(values);
    values.iter().map(|v| v - m).collect()
}

/// `num` evenly spaced values over `[start, stop]`, endpoints included
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| if i == num - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Running sum
pub fn cumsum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, &v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

/// Consecutive differences `x[i+1] - x[i]`
pub fn diff(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Largest value, ignoring NaN (None for empty input)
pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().filter(|v| !v.is_nan()).reduce(f64::max)
}

/// Smallest value, ignoring NaN (None for empty input)
pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().filter(|v| !v.is_nan()).reduce(f64::min)
}
