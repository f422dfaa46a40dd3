//! Normalized landmark points and the 21-point hand model.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════
// Landmark ids
// ════════════════════════════════════════════════════════════════════════════

pub const WRIST:      usize = 0;
pub const THUMB_CMC:  usize = 1;
pub const THUMB_MCP:  usize = 2;
pub const THUMB_IP:   usize = 3;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_MCP:  usize = 5;
pub const INDEX_PIP:  usize = 6;
pub const INDEX_DIP:  usize = 7;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP:   usize = 13;
pub const RING_PIP:   usize = 14;
pub const RING_DIP:   usize = 15;
pub const RING_TIP:   usize = 16;
pub const PINKY_MCP:  usize = 17;
pub const PINKY_PIP:  usize = 18;
pub const PINKY_DIP:  usize = 19;
pub const PINKY_TIP:  usize = 20;

/// Number of landmarks in a complete hand.
pub const LANDMARK_COUNT: usize = 21;

/// Skeleton edges between landmark ids, palm first, then each finger from
/// knuckle to tip.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (WRIST, INDEX_MCP), (INDEX_MCP, MIDDLE_MCP),
    (MIDDLE_MCP, RING_MCP), (RING_MCP, PINKY_MCP), (WRIST, PINKY_MCP),
    (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
];

// ════════════════════════════════════════════════════════════════════════════
// LandmarkPoint
// ════════════════════════════════════════════════════════════════════════════

/// A landmark position in normalized image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
}

impl LandmarkPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        LandmarkPoint { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: LandmarkPoint) -> f32 {
        let (dx, dy) = self.delta(other);
        (dx * dx + dy * dy).sqrt()
    }

    /// Displacement `self - origin`, as `(dx, dy)`.
    pub fn delta(self, origin: LandmarkPoint) -> (f32, f32) {
        (self.x - origin.x, self.y - origin.y)
    }

    /// Reflect across the vertical centre line of the image.
    pub fn mirrored(self) -> Self {
        LandmarkPoint { x: 1.0 - self.x, y: self.y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = LandmarkPoint::new(0.1, 0.1);
        let b = LandmarkPoint::new(0.4, 0.5);
        assert!((a.distance(b) - 0.5).abs() < 1e-6);
        assert!((b.distance(a) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn delta_is_current_minus_origin() {
        let (dx, dy) = LandmarkPoint::new(0.45, 0.40).delta(LandmarkPoint::new(0.40, 0.42));
        assert!((dx - 0.05).abs() < 1e-6);
        assert!((dy + 0.02).abs() < 1e-6);
    }

    #[test]
    fn mirror_flips_x_only() {
        let p = LandmarkPoint::new(0.25, 0.6).mirrored();
        assert!((p.x - 0.75).abs() < 1e-6);
        assert_eq!(p.y, 0.6);
    }

    #[test]
    fn connections_stay_inside_hand_model() {
        for &(a, b) in HAND_CONNECTIONS.iter() {
            assert!(a < LANDMARK_COUNT && b < LANDMARK_COUNT);
            assert_ne!(a, b);
        }
    }

    #[test]
    fn nan_point_is_not_finite() {
        assert!(!LandmarkPoint::new(f32::NAN, 0.2).is_finite());
        assert!(LandmarkPoint::new(0.0, 1.0).is_finite());
    }
}
