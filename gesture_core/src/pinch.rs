//! Thumb/index pinch detection.

use hand_frame::{HandObservation, LandmarkPoint};

/// Thumb-tip to index-tip distance (normalized units) below which a hand
/// counts as pinched.
pub const PINCH_THRESHOLD: f32 = 0.05;

/// Pinch test with the default threshold.
pub fn is_pinched(thumb_tip: LandmarkPoint, index_tip: LandmarkPoint) -> bool {
    PinchDetector::default().is_pinched(thumb_tip, index_tip)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchDetector {
    pub threshold: f32,
}

impl Default for PinchDetector {
    fn default() -> Self {
        PinchDetector { threshold: PINCH_THRESHOLD }
    }
}

impl PinchDetector {
    pub fn new(threshold: f32) -> Self {
        PinchDetector { threshold }
    }

    /// True iff the tips are strictly closer than the threshold.  NaN
    /// coordinates never pinch.
    pub fn is_pinched(&self, thumb_tip: LandmarkPoint, index_tip: LandmarkPoint) -> bool {
        thumb_tip.distance(index_tip) < self.threshold
    }

    /// Pinch state of a whole hand; a hand missing either tip is open.
    pub fn observe(&self, hand: &HandObservation) -> bool {
        match (hand.thumb_tip(), hand.index_tip()) {
            (Some(thumb), Some(index)) => self.is_pinched(thumb, index),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_frame::Handedness;

    const THUMB: LandmarkPoint = LandmarkPoint::new(0.5, 0.5);

    #[test]
    fn distance_below_threshold_pinches() {
        assert!(is_pinched(THUMB, LandmarkPoint::new(0.53, 0.5)));
        assert!(is_pinched(THUMB, LandmarkPoint::new(0.52, 0.52)));
        assert!(is_pinched(THUMB, THUMB));
    }

    #[test]
    fn distance_above_threshold_is_open() {
        assert!(!is_pinched(THUMB, LandmarkPoint::new(0.56, 0.5)));
        assert!(!is_pinched(THUMB, LandmarkPoint::new(0.5, 0.40)));
    }

    #[test]
    fn threshold_is_monotone() {
        // Walk the index tip away from the thumb; once open it stays open.
        let mut opened = false;
        for step in 0..100 {
            let d = step as f32 * 0.001;
            let pinched = is_pinched(THUMB, LandmarkPoint::new(0.5 + d, 0.5));
            if opened {
                assert!(!pinched, "re-pinched at d={}", d);
            }
            opened |= !pinched;
            if d < 0.049 { assert!(pinched); }
            if d > 0.051 { assert!(!pinched); }
        }
    }

    #[test]
    fn nan_is_not_pinched() {
        assert!(!is_pinched(LandmarkPoint::new(f32::NAN, 0.5), THUMB));
    }

    #[test]
    fn custom_threshold() {
        let loose = PinchDetector::new(0.2);
        assert!(loose.is_pinched(THUMB, LandmarkPoint::new(0.6, 0.6)));
    }

    #[test]
    fn observe_reads_hand_tips() {
        let wrist = LandmarkPoint::new(0.5, 0.9);
        let closed = HandObservation::from_key_points(
            Handedness::Left, wrist, THUMB, LandmarkPoint::new(0.51, 0.5),
        );
        let open = HandObservation::from_key_points(
            Handedness::Left, wrist, THUMB, LandmarkPoint::new(0.7, 0.3),
        );
        let stub = HandObservation::new(Handedness::Left, vec![wrist; 5]);

        let detector = PinchDetector::default();
        assert!(detector.observe(&closed));
        assert!(!detector.observe(&open));
        assert!(!detector.observe(&stub));
    }
}
