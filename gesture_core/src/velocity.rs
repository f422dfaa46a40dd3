//! Fast-motion gestures: wrist swipes and pinch-distance changes.
//!
//! Unlike displacement tracking there is no gate and no reset: every
//! observation becomes the next "previous" sample, whether or not it fired.

use std::time::Duration;

use crate::event::SignalGesture;
use crate::state::{Sample, TrackerState};

/// Wrist speed (normalized units / second) a swipe must exceed.
pub const SWIPE_SPEED: f32 = 1.5;

/// Thumb–index distance rate (normalized units / second) a pinch must exceed.
pub const PINCH_SPEED: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityThresholds {
    pub swipe_speed: f32,
    pub pinch_speed: f32,
}

impl Default for VelocityThresholds {
    fn default() -> Self {
        VelocityThresholds { swipe_speed: SWIPE_SPEED, pinch_speed: PINCH_SPEED }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocityGestureDetector {
    pub thresholds: VelocityThresholds,
}

/// Signed rate of change from `previous` to `(value, now)`.  `None` unless
/// time moved strictly forward.
fn signed_velocity(previous: Sample<f32>, value: f32, now: Duration) -> Option<f32> {
    let dt = now.checked_sub(previous.at)?.as_secs_f32();
    if dt <= 0.0 {
        return None;
    }
    Some((value - previous.value) / dt)
}

/// Pick `negative` or `positive` by the sign of `velocity` when its magnitude
/// exceeds `threshold`.
fn classify(velocity: f32, threshold: f32, negative: SignalGesture, positive: SignalGesture) -> Option<SignalGesture> {
    if velocity.abs() > threshold {
        Some(if velocity < 0.0 { negative } else { positive })
    } else {
        None
    }
}

impl VelocityGestureDetector {
    pub fn new(thresholds: VelocityThresholds) -> Self {
        VelocityGestureDetector { thresholds }
    }

    /// Feed the wrist x-coordinate.  Moving toward smaller x fast enough is a
    /// left swipe, toward larger x a right swipe.
    pub fn swipe(&self, state: &mut TrackerState<f32>, wrist_x: f32, now: Duration) -> Option<SignalGesture> {
        let previous = state.record(wrist_x, now)?;
        let velocity = signed_velocity(previous, wrist_x, now)?;
        classify(velocity, self.thresholds.swipe_speed, SignalGesture::LeftSwipe, SignalGesture::RightSwipe)
    }

    /// Feed the thumb–index distance.  Closing fast enough is a pinch-in,
    /// opening a pinch-out.
    pub fn pinch(&self, state: &mut TrackerState<f32>, distance: f32, now: Duration) -> Option<SignalGesture> {
        let previous = state.record(distance, now)?;
        let velocity = signed_velocity(previous, distance, now)?;
        classify(velocity, self.thresholds.pinch_speed, SignalGesture::PinchIn, SignalGesture::PinchOut)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
