//! Segment generator protocol
//!
//! A generator is a small state machine:
//!
//! ```text
//! Unbound --initialize(Some)--> Active --advance: empty--> Exhausted
//!    ^                            |  ^                         |
//!    +------initialize(None)------+  +------initialize---------+
//! ```
//!
//! `advance` hands out one [`Segment`] at a time and reports
//! [`Advance::Exhausted`] instead of ever producing an empty one.

use crate::segment::Segment;
use hrv_core::{Error, Result};
use hrv_signal::Signal;
use std::sync::Arc;

/// Outcome of a single [`SegmentGenerator::advance`] call
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    Segment(Segment),
    Exhausted,
}

impl Advance {
    pub fn into_segment(self) -> Option<Segment> {
        match self {
            Self::Segment(segment) => Some(segment),
            Self::Exhausted => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    /// No signal attached; only structural parameters are known
    Unbound,
    Active,
    /// Terminal until the next `initialize`
    Exhausted,
}

/// Lazy producer of segments over a bound signal
pub trait SegmentGenerator: Send {
    fn name(&self) -> &'static str;

    /// Attach `signal` (or detach with `None`) and rewind to the first segment
    fn initialize(&mut self, signal: Option<Arc<Signal>>) -> Result<()>;

    fn advance(&mut self) -> Result<Advance>;

    fn state(&self) -> GeneratorState;

    /// Iterator over the remaining segments
    fn segments(&mut self) -> Segments<'_>
    where
        Self: Sized,
    {
        Segments::new(self)
    }

    /// Drain the remaining segments
    fn collect_segments(&mut self) -> Result<Vec<Segment>>
    where
        Self: Sized,
    {
        self.segments().collect()
    }
}

/// [`Iterator`] adapter over a generator
///
/// Ends at the first exhaustion or error; the error is yielded once.
pub struct Segments<'a> {
    generator: &'a mut dyn SegmentGenerator,
    done: bool,
}

impl<'a> Segments<'a> {
    pub fn new(generator: &'a mut dyn SegmentGenerator) -> Self {
        Self {
            generator,
            done: false,
        }
    }
}

impl Iterator for Segments<'_> {
    type Item = Result<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.generator.advance() {
            Ok(Advance::Segment(segment)) => Some(Ok(segment)),
            Ok(Advance::Exhausted) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Signal of a generator that cannot run unbound
pub(crate) fn require_signal<'a>(
    signal: &'a Option<Arc<Signal>>,
    generator: &str,
) -> Result<&'a Arc<Signal>> {
    signal.as_ref().ok_or_else(|| {
        Error::Usage(format!(
            "{generator} cannot produce segments without a signal; initialize it with one first"
        ))
    })
}

pub(crate) fn bound_state(signal: &Option<Arc<Signal>>) -> GeneratorState {
    if signal.is_some() {
        GeneratorState::Active
    } else {
        GeneratorState::Unbound
    }
}
