use crate::generator::{bound_state, require_signal, Advance, GeneratorState, SegmentGenerator};
use crate::segment::Segment;
use hrv_core::{Error, Result};
use hrv_signal::Signal;
use std::sync::Arc;
use tracing::debug;

// Absorbs floating point noise in sample times
const TIME_EPSILON: f64 = 1e-9;

/// Windows of a fixed duration
///
/// Each window opens at the sample under the cursor, at time `t`, and covers
/// the samples in `[t, t + width]`. The cursor then moves to the first sample
/// past `t + step`, so a sample on the step boundary closes the window rather
/// than opening the next one. Durations are in seconds; `start` is an offset
/// from the first sample.
#[derive(Debug, Clone)]
pub struct TimeSegments {
    step: f64,
    width: f64,
    start: f64,
    cursor: usize,
    times: Vec<f64>,
    signal: Option<Arc<Signal>>,
    state: GeneratorState,
}

fn positive(value: f64, what: &str) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidParameter(format!(
            "{what} must be a positive duration, got {value}"
        )))
    }
}

impl TimeSegments {
    pub fn new(step: f64) -> Result<Self> {
        let step = positive(step, "segment step")?;
        Ok(Self {
            step,
            width: step,
            start: 0.0,
            cursor: 0,
            times: Vec::new(),
            signal: None,
            state: GeneratorState::Unbound,
        })
    }

    pub fn with_width(mut self, width: f64) -> Result<Self> {
        self.width = positive(width, "segment width")?;
        Ok(self)
    }

    pub fn with_start(mut self, start: f64) -> Result<Self> {
        if !(start >= 0.0 && start.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "segment start offset must be non-negative, got {start}"
            )));
        }
        self.start = start;
        Ok(self)
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    fn first_at_or_after(&self, from: usize, t: f64) -> usize {
        from + self.times[from..].partition_point(|&x| x < t - TIME_EPSILON)
    }

    fn first_past(&self, from: usize, t: f64) -> usize {
        from + self.times[from..].partition_point(|&x| x <= t + TIME_EPSILON)
    }
}

impl SegmentGenerator for TimeSegments {
    fn name(&self) -> &'static str {
        "time_segments"
    }

    fn initialize(&mut self, signal: Option<Arc<Signal>>) -> Result<()> {
        self.state = bound_state(&signal);
        self.times = signal.as_ref().map(|s| s.times()).unwrap_or_default();
        self.cursor = match self.times.first() {
            Some(&t0) => self.first_at_or_after(0, t0 + self.start),
            None => 0,
        };
        debug!(
            step = self.step,
            width = self.width,
            samples = self.times.len(),
            "time segmentation bound"
        );
        self.signal = signal;
        Ok(())
    }

    fn advance(&mut self) -> Result<Advance> {
        let signal = Arc::clone(require_signal(&self.signal, self.name())?);
        if self.state == GeneratorState::Exhausted {
            return Ok(Advance::Exhausted);
        }
        if self.cursor >= self.times.len() {
            self.state = GeneratorState::Exhausted;
            return Ok(Advance::Exhausted);
        }

        let begin = self.cursor;
        let opened_at = self.times[begin];
        let end = self.first_past(begin, opened_at + self.width);
        // Always moves at least one sample: times[begin] <= opened_at + step
        self.cursor = self.first_past(begin, opened_at + self.step);

        let segment = Segment::bound(begin, end, None, signal);
        if segment.is_empty() {
            self.state = GeneratorState::Exhausted;
            return Ok(Advance::Exhausted);
        }
        Ok(Advance::Segment(segment))
    }

    fn state(&self) -> GeneratorState {
        self.state
    }
}
