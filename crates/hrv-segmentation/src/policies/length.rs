use crate::generator::{bound_state, require_signal, Advance, GeneratorState, SegmentGenerator};
use crate::segment::Segment;
use hrv_core::{Error, Result};
use hrv_signal::Signal;
use std::sync::Arc;
use tracing::debug;

/// Windows of a fixed number of samples
///
/// Yields `[i, i + width)` for `i = start, start + step, ...` until a window
/// would start past the end of the signal. The last window may be shorter.
#[derive(Debug, Clone)]
pub struct LengthSegments {
    step: usize,
    width: usize,
    start: usize,
    cursor: usize,
    signal: Option<Arc<Signal>>,
    state: GeneratorState,
}

impl LengthSegments {
    /// Adjacent windows of `step` samples
    pub fn new(step: usize) -> Result<Self> {
        if step == 0 {
            return Err(Error::InvalidParameter(
                "segment step must be at least one sample".to_string(),
            ));
        }
        Ok(Self {
            step,
            width: step,
            start: 0,
            cursor: 0,
            signal: None,
            state: GeneratorState::Unbound,
        })
    }

    /// Window width; zero restores the default of one step
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = if width == 0 { self.step } else { width };
        self
    }

    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self.cursor = start;
        self
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl SegmentGenerator for LengthSegments {
    fn name(&self) -> &'static str {
        "length_segments"
    }

    fn initialize(&mut self, signal: Option<Arc<Signal>>) -> Result<()> {
        self.cursor = self.start;
        self.state = bound_state(&signal);
        if let Some(signal) = &signal {
            debug!(
                step = self.step,
                width = self.width,
                len = signal.len(),
                "length segmentation bound"
            );
        }
        self.signal = signal;
        Ok(())
    }

    fn advance(&mut self) -> Result<Advance> {
        let signal = require_signal(&self.signal, self.name())?;
        if self.state == GeneratorState::Exhausted {
            return Ok(Advance::Exhausted);
        }

        let begin = self.cursor;
        let end = begin.saturating_add(self.width);
        let segment = Segment::bound(begin, end, None, Arc::clone(signal));
        if segment.is_empty() {
            self.state = GeneratorState::Exhausted;
            return Ok(Advance::Exhausted);
        }
        self.cursor = begin.saturating_add(self.step);
        Ok(Advance::Segment(segment))
    }

    fn state(&self) -> GeneratorState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(n: usize) -> Arc<Signal> {
        Arc::new(Signal::evenly((0..n).map(|i| i as f64).collect(), 4.0, "TEST", 0.0).unwrap())
    }

    fn ranges(generator: &mut LengthSegments) -> Vec<(usize, usize)> {
        generator
            .collect_segments()
            .unwrap()
            .iter()
            .map(|s| (s.begin(), s.end()))
            .collect()
    }

    #[test]
    fn test_adjacent_windows() {
        let mut gen = LengthSegments::new(64).unwrap();
        gen.initialize(Some(signal(256))).unwrap();
        assert_eq!(gen.state(), GeneratorState::Active);
        assert_eq!(ranges(&mut gen), vec![(0, 64), (64, 128), (128, 192), (192, 256)]);
        assert_eq!(gen.state(), GeneratorState::Exhausted);
        assert_eq!(gen.advance().unwrap(), Advance::Exhausted);
    }

    #[test]
    fn test_overlapping_windows_with_offset() {
        let mut gen = LengthSegments::new(3).unwrap().with_width(5).with_start(1);
        gen.initialize(Some(signal(10))).unwrap();
        assert_eq!(ranges(&mut gen), vec![(1, 6), (4, 9), (7, 10)]);
    }

    #[test]
    fn test_unbound_is_a_usage_error() {
        let mut gen = LengthSegments::new(4).unwrap();
        assert_eq!(gen.state(), GeneratorState::Unbound);
        assert!(matches!(gen.advance(), Err(Error::Usage(_))));
    }

    #[test]
    fn test_reinitialize_restarts() {
        let s = signal(20);
        let mut gen = LengthSegments::new(8).unwrap();
        gen.initialize(Some(Arc::clone(&s))).unwrap();
        let first = ranges(&mut gen);
        gen.initialize(Some(s)).unwrap();
        assert_eq!(ranges(&mut gen), first);
    }

    #[test]
    fn test_zero_step_rejected() {
        assert!(LengthSegments::new(0).is_err());
        assert_eq!(LengthSegments::new(5).unwrap().with_width(0).width(), 5);
    }
}
