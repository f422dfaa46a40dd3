//! Fingertip displacement → cardinal direction, while a gating pinch holds.
//!
//! One hand "holds" (pinches) and the other hand "points".  As long as the
//! holding hand stays pinched, each frame compares the pointing fingertip
//! with where it was on the previous frame; a step larger than the noise
//! threshold becomes a direction.  Releasing the pinch forgets the previous
//! position, so re-engaging never produces a jump from a stale baseline.

use std::time::Duration;

use hand_frame::LandmarkPoint;

use crate::event::Direction;
use crate::state::TrackerState;

/// Per-axis displacement (normalized units) a step must exceed to count as
/// movement rather than jitter.
pub const NOISE_THRESHOLD: f32 = 0.02;

/// Classify a displacement.  The dominant axis wins; `|dx| == |dy|` goes to
/// the vertical axis.  `None` when neither component exceeds `noise`.
pub fn classify_displacement(dx: f32, dy: f32, noise: f32) -> Option<Direction> {
    if !(dx.abs() > noise || dy.abs() > noise) {
        return None;
    }
    let direction = if dx.abs() > dy.abs() {
        if dx > 0.0 { Direction::Right } else { Direction::Left }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    };
    Some(direction)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplacementTracker {
    pub noise_threshold: f32,
}

impl Default for DisplacementTracker {
    fn default() -> Self {
        DisplacementTracker { noise_threshold: NOISE_THRESHOLD }
    }
}

impl DisplacementTracker {
    pub fn new(noise_threshold: f32) -> Self {
        DisplacementTracker { noise_threshold }
    }

    /// Advance `state` by one frame and return the candidate direction.
    ///
    /// * not `engaged` → state cleared, nothing emitted;
    /// * engaged, no fingertip → state untouched;
    /// * engaged with a fingertip → direction against the previous position
    ///   (if any), then the fingertip becomes the new baseline whether or
    ///   not a direction came out.
    pub fn update(
        &self,
        state:   &mut TrackerState<LandmarkPoint>,
        engaged: bool,
        tip:     Option<LandmarkPoint>,
        now:     Duration,
    ) -> Option<Direction> {
        if !engaged {
            state.reset();
            return None;
        }
        let tip = tip?;
        let previous = state.record(tip, now)?;
        let (dx, dy) = tip.delta(previous.value);
        classify_displacement(dx, dy, self.noise_threshold)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
