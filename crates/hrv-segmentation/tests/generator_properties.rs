use approx::assert_relative_eq;
use hrv_segmentation::{
    Advance, ExistingSegments, GeneratorState, LengthSegments, SegmentGenerator, TimeSegments,
};
use hrv_signal::Signal;
use proptest::prelude::*;
use std::sync::Arc;

fn evenly(n: usize, fs: f64) -> Arc<Signal> {
    Arc::new(Signal::evenly((0..n).map(|i| i as f64).collect(), fs, "TEST", 0.0).unwrap())
}

fn ranges<G: SegmentGenerator>(generator: &mut G) -> Vec<(usize, usize)> {
    generator
        .collect_segments()
        .unwrap()
        .iter()
        .map(|s| (s.begin(), s.end()))
        .collect()
}

#[test]
fn four_adjacent_segments_over_256_samples() {
    let signal = evenly(256, 4.0);
    let mut generator = LengthSegments::new(64).unwrap().with_width(64);
    generator.initialize(Some(signal)).unwrap();
    assert_eq!(
        ranges(&mut generator),
        vec![(0, 64), (64, 128), (128, 192), (192, 256)]
    );
}

#[test]
fn exhausted_generator_stays_exhausted() {
    let mut generator = LengthSegments::new(10).unwrap();
    generator.initialize(Some(evenly(15, 1.0))).unwrap();
    assert_eq!(ranges(&mut generator).len(), 2);
    for _ in 0..3 {
        assert_eq!(generator.advance().unwrap(), Advance::Exhausted);
    }
    assert_eq!(generator.state(), GeneratorState::Exhausted);
}

#[test]
fn materialized_segments_cover_the_signal() {
    let signal = evenly(100, 2.0);
    let mut generator = TimeSegments::new(10.0).unwrap();
    generator.initialize(Some(Arc::clone(&signal))).unwrap();
    let parts: Vec<Signal> = generator
        .segments()
        .map(|s| s.and_then(|s| s.materialize()))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(parts.len(), 5);
    let joined: Vec<f64> = parts.iter().flat_map(|p| p.values().to_vec()).collect();
    assert_eq!(joined, signal.values());
    // the sample at 10 s closes the first window
    assert_eq!(parts[0].len(), 21);
    assert_eq!(parts[1].start_time(), 10.5);
}

#[test]
fn time_windows_on_rr_beats_start_at_segment_beats() {
    let signal = Arc::new(Signal::from_rr_intervals(vec![800.0; 20]).unwrap());
    let mut generator = TimeSegments::new(4.0).unwrap();
    generator.initialize(Some(Arc::clone(&signal))).unwrap();
    let parts: Vec<Signal> = generator
        .segments()
        .map(|s| s.and_then(|s| s.materialize()))
        .collect::<Result<_, _>>()
        .unwrap();
    // beats every 0.8 s from 0.8 s; a beat exactly 4 s after the opening one closes the window
    assert_eq!(parts.iter().map(Signal::len).collect::<Vec<_>>(), vec![6, 6, 6, 2]);
    assert_relative_eq!(parts[1].start_time(), 5.6, epsilon = 1e-9);
    assert_relative_eq!(parts[3].end_time(), 16.0, epsilon = 1e-9);
}

proptest! {
    #[test]
    fn length_segments_never_empty_and_restartable(
        len in 1usize..400,
        step in 1usize..50,
        width in 0usize..80,
        start in 0usize..60,
    ) {
        let signal = evenly(len, 4.0);
        let mut generator = LengthSegments::new(step).unwrap().with_width(width).with_start(start);
        generator.initialize(Some(Arc::clone(&signal))).unwrap();
        let first = ranges(&mut generator);
        prop_assert!(first.iter().all(|(b, e)| b < e && *e <= len));

        let expected = if start >= len { 0 } else { (len - start).div_ceil(step) };
        prop_assert_eq!(first.len(), expected);

        generator.initialize(Some(signal)).unwrap();
        prop_assert_eq!(ranges(&mut generator), first);
    }

    #[test]
    fn time_segments_never_empty_and_restartable(
        gaps in proptest::collection::vec(300.0f64..1500.0, 1..200),
        step in 0.5f64..60.0,
        width in 0.5f64..90.0,
    ) {
        let signal = Arc::new(Signal::from_rr_intervals(gaps.clone()).unwrap());
        let mut generator = TimeSegments::new(step).unwrap().with_width(width).unwrap();
        generator.initialize(Some(Arc::clone(&signal))).unwrap();
        let first = ranges(&mut generator);
        prop_assert!(!first.is_empty());
        prop_assert!(first.iter().all(|(b, e)| b < e && *e <= gaps.len()));
        prop_assert!(first.windows(2).all(|w| w[0].0 < w[1].0));

        generator.initialize(Some(signal)).unwrap();
        prop_assert_eq!(ranges(&mut generator), first);
    }

    #[test]
    fn existing_segments_replay_identically(
        bounds in proptest::collection::vec((0usize..50, 1usize..50), 0..20),
    ) {
        let list: Vec<(usize, usize, Option<String>)> = bounds
            .iter()
            .map(|&(begin, len)| (begin, begin + len, None))
            .collect();
        let mut generator = ExistingSegments::from_ranges(list);
        generator.initialize(Some(evenly(60, 1.0))).unwrap();
        let first = ranges(&mut generator);
        prop_assert!(first.iter().all(|(b, e)| b < e));
        prop_assert_eq!(ranges(&mut generator), first);
    }
}
