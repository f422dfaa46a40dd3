//! Per-entity "previous sample" memory shared by the detectors.

use std::time::Duration;

/// A value and the time it was observed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample<T> {
    pub value: T,
    pub at:    Duration,
}

/// Last sample of one tracked quantity (a fingertip, a wrist x, a pinch
/// distance).  Either empty or holding a value *and* its timestamp.
///
/// The owner (a pipeline) keeps one per tracked hand and gesture type and
/// lends it to a detector on every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackerState<T> {
    last: Option<Sample<T>>,
}

impl<T> Default for TrackerState<T> {
    fn default() -> Self {
        TrackerState { last: None }
    }
}

impl<T: Copy> TrackerState<T> {
    pub const fn empty() -> Self {
        TrackerState { last: None }
    }

    pub fn last(&self) -> Option<Sample<T>> { self.last }

    pub fn is_empty(&self) -> bool { self.last.is_none() }

    /// Store `value` as the latest sample and return the one it replaces.
    pub fn record(&mut self, value: T, at: Duration) -> Option<Sample<T>> {
        self.last.replace(Sample { value, at })
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
