use crate::generator::{bound_state, require_signal, Advance, GeneratorState, SegmentGenerator};
use crate::segment::{EventMarkers, Segment};
use hrv_core::Result;
use hrv_signal::Signal;
use std::sync::Arc;
use tracing::debug;

/// Segments between consecutive event instants
///
/// Event `k` opens a segment labelled with its own label that runs until
/// event `k + 1` (or the end of the signal for the last event). Samples
/// before the first event form a leading segment only when a baseline label
/// is given.
#[derive(Debug, Clone)]
pub struct FromEventsSegments {
    events: EventMarkers,
    baseline: Option<String>,
    boundaries: Vec<usize>,
    next_event: usize,
    baseline_pending: bool,
    signal: Option<Arc<Signal>>,
    state: GeneratorState,
}

impl FromEventsSegments {
    pub fn new(events: EventMarkers) -> Self {
        Self {
            events,
            baseline: None,
            boundaries: Vec::new(),
            next_event: 0,
            baseline_pending: false,
            signal: None,
            state: GeneratorState::Unbound,
        }
    }

    /// Label the samples before the first event as a baseline segment
    pub fn with_baseline(mut self, label: impl Into<String>) -> Self {
        self.baseline = Some(label.into());
        self
    }

    pub fn events(&self) -> &EventMarkers {
        &self.events
    }
}

impl SegmentGenerator for FromEventsSegments {
    fn name(&self) -> &'static str {
        "from_events_segments"
    }

    fn initialize(&mut self, signal: Option<Arc<Signal>>) -> Result<()> {
        self.state = bound_state(&signal);
        self.next_event = 0;
        self.boundaries = match &signal {
            Some(signal) => {
                let times = signal.times();
                self.events
                    .times()
                    .iter()
                    .map(|&t| times.partition_point(|&x| x < t))
                    .collect()
            }
            None => Vec::new(),
        };
        self.baseline_pending = self.baseline.is_some()
            && self.boundaries.first().is_some_and(|&first| first > 0);
        debug!(
            events = self.events.len(),
            baseline = self.baseline_pending,
            "event segmentation bound"
        );
        self.signal = signal;
        Ok(())
    }

    fn advance(&mut self) -> Result<Advance> {
        let signal = Arc::clone(require_signal(&self.signal, self.name())?);
        if self.state == GeneratorState::Exhausted {
            return Ok(Advance::Exhausted);
        }

        if self.baseline_pending {
            self.baseline_pending = false;
            let end = self.boundaries[0];
            return Ok(Advance::Segment(Segment::bound(0, end, self.baseline.clone(), signal)));
        }

        let k = self.next_event;
        let segment = self.boundaries.get(k).map(|&begin| {
            let end = self.boundaries.get(k + 1).copied().unwrap_or(signal.len());
            let label = self.events.labels()[k].clone();
            Segment::bound(begin, end, Some(label), Arc::clone(&signal))
        });
        match segment {
            Some(segment) if !segment.is_empty() => {
                self.next_event += 1;
                Ok(Advance::Segment(segment))
            }
            _ => {
                self.state = GeneratorState::Exhausted;
                Ok(Advance::Exhausted)
            }
        }
    }

    fn state(&self) -> GeneratorState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrv_core::Error;

    fn markers(times: &[f64], labels: &[&str]) -> EventMarkers {
        EventMarkers::new(times.to_vec(), labels.iter().map(|l| l.to_string()).collect()).unwrap()
    }

    fn signal() -> Arc<Signal> {
        // samples at 0.0, 0.5, ..., 9.5 s
        Arc::new(Signal::evenly(vec![0.0; 20], 2.0, "TEST", 0.0).unwrap())
    }

    fn described(gen: &mut FromEventsSegments) -> Vec<(usize, usize, Option<String>)> {
        gen.collect_segments()
            .unwrap()
            .into_iter()
            .map(|s| (s.begin(), s.end(), s.label().map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_segments_between_events() {
        let mut gen = FromEventsSegments::new(markers(&[2.0, 5.0, 8.0], &["a", "b", "c"]));
        gen.initialize(Some(signal())).unwrap();
        assert_eq!(
            described(&mut gen),
            vec![
                (4, 10, Some("a".to_string())),
                (10, 16, Some("b".to_string())),
                (16, 20, Some("c".to_string())),
            ]
        );
    }

    #[test]
    fn test_baseline_prefix() {
        let mut gen =
            FromEventsSegments::new(markers(&[2.0, 5.0], &["a", "b"])).with_baseline("baseline");
        gen.initialize(Some(signal())).unwrap();
        let segments = described(&mut gen);
        assert_eq!(segments[0], (0, 4, Some("baseline".to_string())));
        assert_eq!(segments.len(), 3);
    }

    #[test]
    fn test_event_after_signal_end_exhausts() {
        let mut gen = FromEventsSegments::new(markers(&[1.0, 20.0], &["a", "b"]));
        gen.initialize(Some(signal())).unwrap();
        assert_eq!(described(&mut gen), vec![(2, 20, Some("a".to_string()))]);
    }

    #[test]
    fn test_requires_signal() {
        let mut gen = FromEventsSegments::new(markers(&[1.0], &["a"]));
        assert!(matches!(gen.advance(), Err(Error::Usage(_))));
    }
}
