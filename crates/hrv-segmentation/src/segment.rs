//! Segment type

use hrv_core::{Error, Result};
use hrv_signal::Signal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A positional range `[begin, end)` over a signal, with an optional label
///
/// A bound segment keeps a handle on its signal and never reaches past its
/// end; an unbound one only describes the range.
#[derive(Debug, Clone)]
pub struct Segment {
    begin: usize,
    end: usize,
    label: Option<String>,
    signal: Option<Arc<Signal>>,
}

impl Segment {
    /// Unbound segment; a `begin` past `end` collapses onto `end`
    pub fn new(begin: usize, end: usize, label: Option<String>) -> Self {
        Self {
            begin: begin.min(end),
            end,
            label,
            signal: None,
        }
    }

    /// Segment over `signal`, with both ends clamped to the signal length
    pub fn bound(begin: usize, end: usize, label: Option<String>, signal: Arc<Signal>) -> Self {
        let end = end.min(signal.len());
        Self {
            begin: begin.min(end),
            end,
            label,
            signal: Some(signal),
        }
    }

    /// Same range and label over another signal
    pub fn rebind(&self, signal: Arc<Signal>) -> Self {
        Self::bound(self.begin, self.end, self.label.clone(), signal)
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn signal(&self) -> Option<&Arc<Signal>> {
        self.signal.as_ref()
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.begin >= self.end
    }

    /// Copy of the covered samples as a new signal with its own cache
    pub fn materialize(&self) -> Result<Signal> {
        let signal = self.signal.as_ref().ok_or_else(|| {
            Error::Usage(format!("segment {self} is not bound to a signal"))
        })?;
        if self.is_empty() {
            return Err(Error::empty_input("segment"));
        }
        Ok(signal.segment_by_index(self.begin, self.end).into_owned())
    }
}

/// Ranges and labels only; signals are not compared
impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.begin == other.begin && self.end == other.end && self.label == other.label
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{})", self.begin, self.end)?;
        if let Some(label) = &self.label {
            write!(f, " {label}")?;
        }
        Ok(())
    }
}

/// Instants with labels marking the start of each event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMarkers {
    times: Vec<f64>,
    labels: Vec<String>,
}

impl EventMarkers {
    /// Times must be finite and non-decreasing, one label per time
    pub fn new(times: Vec<f64>, labels: Vec<String>) -> Result<Self> {
        if times.len() != labels.len() {
            return Err(Error::size_mismatch(times.len(), labels.len(), "event labels"));
        }
        if times.iter().any(|t| !t.is_finite()) {
            return Err(Error::non_finite("event times"));
        }
        if let Some(position) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(Error::Validation(format!(
                "event times must be non-decreasing (violated at position {})",
                position + 1
            )));
        }
        Ok(Self { times, labels })
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
