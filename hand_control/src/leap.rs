//! Landmark source backed by a real LeapMotion controller (`leap` feature).
//!
//! Requires the LeapC shared library installed.  Each tracking frame is
//! projected onto the 21-point hand layout: the palm stands in for the wrist
//! and every digit contributes the far joint of its four bones.  Millimetres
//! above the device are mapped into the unit square like a camera looking
//! down at the hands.

use std::io;

use hand_frame::{
    Frame, HandObservation, Handedness, LandmarkPoint, LandmarkSource, Reading, SourceError,
    LANDMARK_COUNT,
};
use leaprs::{Connection, ConnectionConfig, Event, HandType};
use tracing::{debug, info};

/// Interaction box, in millimetres: x across the device, y above it.
const X_MIN:   f32 = -200.0;
const Y_MIN:   f32 = 80.0;
const SPAN:    f32 = 400.0;
const POLL_MS: u32 = 100;

pub struct LeapLandmarkSource {
    connection: Connection,
}

impl LeapLandmarkSource {
    pub fn open() -> Result<Self, SourceError> {
        let unavailable = |e: leaprs::Error| SourceError::Unavailable {
            what:   "LeapMotion controller".into(),
            source: io::Error::other(format!("{:?}", e)),
        };
        let mut connection = Connection::create(ConnectionConfig::default()).map_err(unavailable)?;
        connection.open().map_err(unavailable)?;
        info!("LeapC connection open");
        Ok(LeapLandmarkSource { connection })
    }
}

fn normalize(x: f32, y: f32) -> LandmarkPoint {
    LandmarkPoint::new(
        ((x - X_MIN) / SPAN).clamp(0.0, 1.0),
        (1.0 - (y - Y_MIN) / SPAN).clamp(0.0, 1.0),
    )
}

fn observe(hand: &leaprs::Hand) -> HandObservation {
    let handedness = if hand.hand_type() == HandType::Left {
        Handedness::Left
    } else {
        Handedness::Right
    };

    let palm = hand.palm().position();
    let mut landmarks = Vec::with_capacity(LANDMARK_COUNT);
    landmarks.push(normalize(palm.x, palm.y));

    // Thumb first, pinky last; the thumb's metacarpal has zero length so its
    // first joint coincides with the proximal base.
    for digit in hand.digits() {
        for joint in [
            digit.metacarpal().next_joint(),
            digit.proximal().next_joint(),
            digit.intermediate().next_joint(),
            digit.distal().next_joint(),
        ] {
            landmarks.push(normalize(joint.x, joint.y));
        }
    }

    HandObservation::new(handedness, landmarks)
}

impl LandmarkSource for LeapLandmarkSource {
    /// Never ends.  A poll timeout or a non-tracking message is idle; only a
    /// tracking event is a frame, even when it holds no hands.
    fn next_frame(&mut self) -> Result<Option<Reading>, SourceError> {
        let msg = match self.connection.poll(POLL_MS) {
            Ok(m)  => m,
            Err(e) => {
                debug!(error = ?e, "LeapC poll returned nothing");
                return Ok(Some(Reading::Idle));
            }
        };

        Ok(Some(match msg.event() {
            Event::Tracking(frame) => Reading::Frame(Frame::new(frame.hands().map(|h| observe(&h)).collect())),
            _ => Reading::Idle,
        }))
    }
}
