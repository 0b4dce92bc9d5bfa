use crate::generator::{bound_state, Advance, GeneratorState, SegmentGenerator};
use crate::segment::Segment;
use hrv_core::Result;
use hrv_signal::Signal;
use std::sync::Arc;

/// Replays a prepared list of segments
///
/// When bound, every segment is re-bound to the current signal. The list is
/// read from the front again once it has been exhausted, so the generator
/// also works unbound as a plain range preview.
#[derive(Debug, Clone)]
pub struct ExistingSegments {
    segments: Vec<Segment>,
    cursor: usize,
    signal: Option<Arc<Signal>>,
    state: GeneratorState,
}

impl ExistingSegments {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            cursor: 0,
            signal: None,
            state: GeneratorState::Unbound,
        }
    }

    pub fn from_ranges<I, L>(ranges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, Option<L>)>,
        L: Into<String>,
    {
        Self::new(
            ranges
                .into_iter()
                .map(|(begin, end, label)| Segment::new(begin, end, label.map(Into::into)))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn exhaust(&mut self) -> Advance {
        self.cursor = 0;
        self.state = GeneratorState::Exhausted;
        Advance::Exhausted
    }
}

impl SegmentGenerator for ExistingSegments {
    fn name(&self) -> &'static str {
        "existing_segments"
    }

    fn initialize(&mut self, signal: Option<Arc<Signal>>) -> Result<()> {
        self.cursor = 0;
        self.state = bound_state(&signal);
        self.signal = signal;
        Ok(())
    }

    fn advance(&mut self) -> Result<Advance> {
        if self.state == GeneratorState::Exhausted {
            self.state = bound_state(&self.signal);
        }
        let Some(stored) = self.segments.get(self.cursor) else {
            return Ok(self.exhaust());
        };
        let segment = match &self.signal {
            Some(signal) => stored.rebind(Arc::clone(signal)),
            None => stored.clone(),
        };
        if segment.is_empty() {
            return Ok(self.exhaust());
        }
        self.cursor += 1;
        Ok(Advance::Segment(segment))
    }

    fn state(&self) -> GeneratorState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled() -> ExistingSegments {
        ExistingSegments::from_ranges([(0, 3, Some("rest")), (3, 8, Some("task")), (8, 12, None)])
    }

    #[test]
    fn test_unbound_preview() {
        let mut gen = labelled();
        let segments = gen.collect_segments().unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].label(), Some("task"));
        assert!(segments.iter().all(|s| s.signal().is_none()));
    }

    #[test]
    fn test_rebinding_clamps_to_signal() {
        let signal = Arc::new(Signal::evenly(vec![0.0; 10], 1.0, "TEST", 0.0).unwrap());
        let mut gen = labelled();
        gen.initialize(Some(signal)).unwrap();
        let segments = gen.collect_segments().unwrap();
        assert_eq!(segments.last().map(|s| (s.begin(), s.end())), Some((8, 10)));
        assert!(segments.iter().all(|s| s.signal().is_some()));
    }

    #[test]
    fn test_empty_segment_stops_iteration() {
        let signal = Arc::new(Signal::evenly(vec![0.0; 5], 1.0, "TEST", 0.0).unwrap());
        let mut gen = labelled();
        gen.initialize(Some(signal)).unwrap();
        // [8, 12) falls outside a five-sample signal
        assert_eq!(gen.collect_segments().unwrap().len(), 2);
        assert_eq!(gen.state(), GeneratorState::Exhausted);
    }

    #[test]
    fn test_restarts_after_exhaustion() {
        let mut gen = labelled();
        let first = gen.collect_segments().unwrap();
        let second = gen.collect_segments().unwrap();
        assert_eq!(first, second);
    }
}
