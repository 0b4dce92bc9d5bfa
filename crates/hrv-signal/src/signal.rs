//! Time-aware sample sequences
//!
//! A [`Signal`] couples a sample buffer with its sampling metadata and a
//! private [`CalculatorCache`]. Two time bases exist:
//!
//! - **evenly sampled**: sample `k` sits at `start_time + k / sampling_freq`
//! - **unevenly sampled**: sample `k` sits at
//!   `start_time + indices[k] / sampling_freq`, with strictly increasing
//!   integer `indices`
//!
//! Signals are immutable once constructed. Segmenting, resampling and
//! filtering produce new instances, each with an empty cache.

use hrv_core::math::cumsum;
use hrv_core::{CalculatorCache, Error, InterpolationKind, Interpolator, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, warn};

// Absorbs floating point noise when mapping times onto sample positions
const TIME_EPSILON: f64 = 1e-9;

/// Sampling frequency assumed for RR series whose instants are in seconds
pub const RR_TIME_RESOLUTION_HZ: f64 = 1000.0;

/// Positions of the samples of an unevenly sampled signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum XValues {
    /// Integer sample positions at the signal's sampling frequency
    Indices(Vec<i64>),
    /// Sample instants in seconds
    Instants(Vec<f64>),
}

impl XValues {
    fn len(&self) -> usize {
        match self {
            Self::Indices(v) => v.len(),
            Self::Instants(v) => v.len(),
        }
    }
}

/// How sample times are derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TimeBase {
    Evenly,
    Unevenly { indices: Vec<i64> },
}

/// A sample sequence with sampling metadata
pub struct Signal {
    values: Vec<f64>,
    sampling_freq: f64,
    start_time: f64,
    nature: String,
    time_base: TimeBase,
    cache: CalculatorCache,
}

fn check_sampling_freq(sampling_freq: f64) -> Result<()> {
    if !(sampling_freq > 0.0 && sampling_freq.is_finite()) {
        return Err(Error::Validation(format!(
            "sampling frequency must be positive, got {sampling_freq}"
        )));
    }
    Ok(())
}

fn check_strictly_increasing<T: PartialOrd>(values: &[T], context: &str) -> Result<()> {
    match values.windows(2).position(|w| !(w[1] > w[0])) {
        Some(pos) => Err(Error::non_monotonic(context, pos + 1)),
        None => Ok(()),
    }
}

impl Signal {
    /// Create an evenly sampled signal
    pub fn evenly(
        values: Vec<f64>,
        sampling_freq: f64,
        nature: impl Into<String>,
        start_time: f64,
    ) -> Result<Self> {
        check_sampling_freq(sampling_freq)?;
        Ok(Self {
            values,
            sampling_freq,
            start_time,
            nature: nature.into(),
            time_base: TimeBase::Evenly,
            cache: CalculatorCache::new(),
        })
    }

    /// Create an unevenly sampled signal
    ///
    /// With [`XValues::Instants`] the start time defaults to the first
    /// instant and must not come after it; instants are mapped to
    /// `round((t - start_time) * sampling_freq)`. With
    /// [`XValues::Indices`] the start time defaults to zero.
    pub fn unevenly(
        values: Vec<f64>,
        x_values: XValues,
        sampling_freq: f64,
        nature: impl Into<String>,
        start_time: Option<f64>,
    ) -> Result<Self> {
        check_sampling_freq(sampling_freq)?;
        if x_values.len() != values.len() {
            return Err(Error::size_mismatch(values.len(), x_values.len(), "x values"));
        }

        let (indices, start_time) = match x_values {
            XValues::Indices(indices) => {
                check_strictly_increasing(&indices, "indices")?;
                (indices, start_time.unwrap_or(0.0))
            }
            XValues::Instants(instants) => {
                check_strictly_increasing(&instants, "instants")?;
                let first = instants.first().copied().unwrap_or(0.0);
                let start = start_time.unwrap_or(first);
                if start > first {
                    return Err(Error::Validation(format!(
                        "start time {start} is after the first instant {first}"
                    )));
                }
                let indices: Vec<i64> = instants
                    .iter()
                    .map(|t| ((t - start) * sampling_freq).round() as i64)
                    .collect();
                // Instants closer than one sample period collapse onto one index
                check_strictly_increasing(&indices, "instants at the given sampling frequency")?;
                (indices, start)
            }
        };

        Ok(Self {
            values,
            sampling_freq,
            start_time,
            nature: nature.into(),
            time_base: TimeBase::Unevenly { indices },
            cache: CalculatorCache::new(),
        })
    }

    /// Unevenly sampled RR series from intervals in milliseconds
    ///
    /// Beat instants are the running sum of the intervals, in seconds.
    pub fn from_rr_intervals(rr_ms: Vec<f64>) -> Result<Self> {
        let instants: Vec<f64> = cumsum(&rr_ms).into_iter().map(|t| t / 1000.0).collect();
        Self::unevenly(
            rr_ms,
            XValues::Instants(instants),
            RR_TIME_RESOLUTION_HZ,
            "RR",
            None,
        )
    }

    fn derive(&self, values: Vec<f64>, start_time: f64, time_base: TimeBase) -> Self {
        Self {
            values,
            sampling_freq: self.sampling_freq,
            start_time,
            nature: self.nature.clone(),
            time_base,
            cache: CalculatorCache::new(),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sampling_freq(&self) -> f64 {
        self.sampling_freq
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Semantic tag, e.g. "ECG" or "RR"
    pub fn nature(&self) -> &str {
        &self.nature
    }

    pub fn time_base(&self) -> &TimeBase {
        &self.time_base
    }

    pub fn is_evenly(&self) -> bool {
        matches!(self.time_base, TimeBase::Evenly)
    }

    /// Sample positions of an unevenly sampled signal
    pub fn indices(&self) -> Option<&[i64]> {
        match &self.time_base {
            TimeBase::Evenly => None,
            TimeBase::Unevenly { indices } => Some(indices),
        }
    }

    /// Time of sample `i`
    pub fn time_at(&self, i: usize) -> Option<f64> {
        if i >= self.len() {
            return None;
        }
        let position = match &self.time_base {
            TimeBase::Evenly => i as f64,
            TimeBase::Unevenly { indices } => indices[i] as f64,
        };
        Some(position / self.sampling_freq + self.start_time)
    }

    /// Times of all samples
    pub fn times(&self) -> Vec<f64> {
        (0..self.len()).filter_map(|i| self.time_at(i)).collect()
    }

    /// Time of the last sample (the start time for an empty signal)
    pub fn end_time(&self) -> f64 {
        self.len()
            .checked_sub(1)
            .and_then(|last| self.time_at(last))
            .unwrap_or(self.start_time)
    }

    pub fn duration(&self) -> f64 {
        self.end_time() - self.start_time
    }

    /// The calculator cache bound to this instance
    pub fn cache(&self) -> &CalculatorCache {
        &self.cache
    }

    /// Restrict the signal to samples with times in `[t_start, t_stop)`
    ///
    /// `t_stop = None` keeps everything from `t_start` to the end. A range
    /// that does not overlap the signal returns the signal itself, unchanged,
    /// and logs a warning.
    pub fn segment_by_time(&self, t_start: f64, t_stop: Option<f64>) -> Cow<'_, Signal> {
        let end_time = self.end_time();
        let stop = t_stop.unwrap_or(f64::INFINITY);
        if self.is_empty() || t_start > end_time || stop < self.start_time || stop <= t_start {
            warn!(
                t_start,
                t_stop = ?t_stop,
                start_time = self.start_time,
                end_time,
                "time segment is outside the signal, returning the original signal"
            );
            return Cow::Borrowed(self);
        }

        let (begin, end) = match &self.time_base {
            TimeBase::Evenly => {
                let position = |t: f64| {
                    ((t - self.start_time) * self.sampling_freq - TIME_EPSILON)
                        .ceil()
                        .max(0.0) as usize
                };
                let begin = position(t_start).min(self.len());
                let end = match t_stop {
                    Some(t) => position(t).min(self.len()),
                    None => self.len(),
                };
                (begin, end)
            }
            TimeBase::Unevenly { .. } => {
                let times = self.times();
                let begin = times.partition_point(|&t| t < t_start - TIME_EPSILON);
                let end = match t_stop {
                    Some(stop) => times.partition_point(|&t| t < stop - TIME_EPSILON),
                    None => self.len(),
                };
                (begin, end)
            }
        };

        self.slice_or_original(begin, end)
    }

    /// Restrict the signal to sample positions `[begin, end)`
    ///
    /// Positions count samples, for both time bases: on an unevenly sampled
    /// signal they index the value array, not the `indices` grid. `end` is
    /// clamped to the length. An empty or out-of-range request
    /// returns the signal itself, unchanged, and logs a warning.
    pub fn segment_by_index(&self, begin: usize, end: usize) -> Cow<'_, Signal> {
        self.slice_or_original(begin, end.min(self.len()))
    }

    fn slice_or_original(&self, begin: usize, end: usize) -> Cow<'_, Signal> {
        if begin >= end || begin >= self.len() {
            warn!(
                begin,
                end,
                len = self.len(),
                "index segment is outside the signal, returning the original signal"
            );
            return Cow::Borrowed(self);
        }
        Cow::Owned(self.slice(begin, end))
    }

    // Caller guarantees begin < end <= len
    fn slice(&self, begin: usize, end: usize) -> Signal {
        let values = self.values[begin..end].to_vec();
        let start_time = self.time_at(begin).unwrap_or(self.start_time);
        let time_base = match &self.time_base {
            TimeBase::Evenly => TimeBase::Evenly,
            TimeBase::Unevenly { indices } => {
                let origin = indices[begin];
                TimeBase::Unevenly {
                    indices: indices[begin..end].iter().map(|i| i - origin).collect(),
                }
            }
        };
        self.derive(values, start_time, time_base)
    }

    /// Resample to `target_freq`
    ///
    /// An exact integer down-sampling ratio keeps every `ratio`-th sample.
    /// Other ratios interpolate over the sample positions, with the final
    /// sample repeated one period past the end so the output covers the whole
    /// signal; the output has `ceil(len * target_freq / sampling_freq)`
    /// samples. Unevenly sampled signals are made even first.
    pub fn resample(&self, target_freq: f64, kind: InterpolationKind) -> Result<Signal> {
        check_sampling_freq(target_freq)?;
        if !self.is_evenly() {
            return self.to_evenly(kind)?.resample(target_freq, kind);
        }
        if self.is_empty() {
            return Err(Error::empty_input("resample"));
        }

        let ratio = self.sampling_freq / target_freq;
        let exact_ratio = (ratio - ratio.round()).abs() < TIME_EPSILON;
        let values = if target_freq < self.sampling_freq && exact_ratio {
            let step = ratio.round() as usize;
            debug!(step, "resampling by decimation");
            self.values.iter().step_by(step).copied().collect()
        } else {
            let n = self.len();
            let positions: Vec<f64> = (0..=n).map(|i| i as f64).collect();
            let mut extended = self.values.clone();
            extended.push(self.values[n - 1]);
            let interpolator = Interpolator::new(&positions, &extended, kind)?;

            let count =
                (n as f64 * target_freq / self.sampling_freq - TIME_EPSILON).ceil() as usize;
            let targets: Vec<f64> = (0..count).map(|k| k as f64 * ratio).collect();
            debug!(count, %kind, "resampling by interpolation");
            interpolator.sample(&targets)
        };

        Signal::evenly(values, target_freq, self.nature.clone(), self.start_time)
    }

    /// Interpolate onto every sample position between the first and last one
    ///
    /// The result keeps the sampling frequency and starts at the first
    /// sample's time. An evenly sampled signal is returned as a copy.
    pub fn to_evenly(&self, kind: InterpolationKind) -> Result<Signal> {
        let indices = match &self.time_base {
            TimeBase::Evenly => return Ok(self.clone()),
            TimeBase::Unevenly { indices } => indices,
        };
        if self.len() < kind.min_points() {
            return Err(Error::InsufficientData {
                expected: kind.min_points(),
                actual: self.len(),
            });
        }

        let positions: Vec<f64> = indices.iter().map(|&i| i as f64).collect();
        let interpolator = Interpolator::new(&positions, &self.values, kind)?;
        let (first, last) = (indices[0], indices[indices.len() - 1]);
        let targets: Vec<f64> = (first..=last).map(|i| i as f64).collect();

        Signal::evenly(
            interpolator.sample(&targets),
            self.sampling_freq,
            self.nature.clone(),
            self.time_at(0).unwrap_or(self.start_time),
        )
    }

    /// New signal with transformed values and the same time base
    pub fn with_values(&self, values: Vec<f64>) -> Result<Signal> {
        if values.len() != self.len() {
            return Err(Error::size_mismatch(self.len(), values.len(), "replacement values"));
        }
        Ok(self.derive(values, self.start_time, self.time_base.clone()))
    }

    pub(crate) fn with_parts(
        &self,
        values: Vec<f64>,
        start_time: f64,
        time_base: TimeBase,
    ) -> Signal {
        self.derive(values, start_time, time_base)
    }
}

/// Cloning copies samples and metadata; the copy starts with an empty cache.
impl Clone for Signal {
    fn clone(&self) -> Self {
        self.derive(self.values.clone(), self.start_time, self.time_base.clone())
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("nature", &self.nature)
            .field("sampling_freq", &self.sampling_freq)
            .field("start_time", &self.start_time)
            .field("len", &self.len())
            .field("time_base", &self.time_base)
            .finish()
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time_base {
            TimeBase::Evenly => write!(
                f,
                "<signal: {}, start_time: {}, freq: {}Hz, samples: {}>",
                self.nature,
                self.start_time,
                self.sampling_freq,
                self.len()
            ),
            TimeBase::Unevenly { .. } => write!(
                f,
                "<signal: {}, start_time: {}, time resolution: {}s, samples: {}>",
                self.nature,
                self.start_time,
                1.0 / self.sampling_freq,
                self.len()
            ),
        }
    }
}
